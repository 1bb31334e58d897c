use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use env_logger::{Builder, Env};
use karate_club::analysis::run_from_config;
use karate_club::{AnalysisConfig, GraphSource};

/// Analyse the Zachary Karate Club network.
#[derive(Debug, Parser)]
#[command(name = "karate-club", version, about)]
struct Args {
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Graph source: `builtin` (alias `networkx`) or `edgelist`.
    #[arg(short, long)]
    source: Option<GraphSource>,

    /// Edge list path, used with `--source edgelist`.
    #[arg(short, long)]
    edgelist: Option<PathBuf>,

    /// Number of Girvan-Newman communities.
    #[arg(long)]
    communities: Option<usize>,

    /// Number of K-means and hierarchical clusters.
    #[arg(long)]
    clusters: Option<usize>,

    /// Top nodes listed per centrality measure.
    #[arg(long)]
    top: Option<usize>,

    /// Print the full report as JSON.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn into_config(self) -> karate_club::Result<(AnalysisConfig, bool)> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_path(path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(source) = self.source {
            config.load.source = source;
        }
        if let Some(path) = self.edgelist {
            config.load.edgelist_path = path;
        }
        if let Some(n) = self.communities {
            config.communities.num_communities = n;
        }
        if let Some(k) = self.clusters {
            config.clustering.kmeans.n_clusters = k;
            config.clustering.hierarchical_clusters = k;
        }
        if let Some(n) = self.top {
            config.top_n = n;
        }
        Ok((config, self.json))
    }
}

fn init_logger() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{:<5}] {} - {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();

    let (config, json) = Args::parse().into_config()?;
    let report = run_from_config(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use karate_club::Error;

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "communities": {"num_communities": 4},
                "clustering": {"kmeans": {"seed": 7}},
                "top_n": 7
            }"#,
        )
        .unwrap();

        let args = Args::try_parse_from([
            "karate-club",
            "--config",
            path.to_str().unwrap(),
            "--communities",
            "3",
            "--top",
            "2",
            "--source",
            "edgelist",
            "--edgelist",
            "graphs/ring.edgelist",
            "--json",
        ])
        .unwrap();
        let (config, json) = args.into_config().unwrap();

        assert!(json);
        assert_eq!(config.communities.num_communities, 3);
        assert_eq!(config.top_n, 2);
        assert_eq!(config.load.source, GraphSource::Edgelist);
        assert_eq!(config.load.edgelist_path, PathBuf::from("graphs/ring.edgelist"));
        // untouched by flags, so the file wins over the default
        assert_eq!(config.clustering.kmeans.seed, 7);
    }

    #[test]
    fn clusters_flag_sets_both_counts() {
        let args = Args::try_parse_from(["karate-club", "--clusters", "3"]).unwrap();
        let (config, json) = args.into_config().unwrap();

        assert!(!json);
        assert_eq!(config.clustering.kmeans.n_clusters, 3);
        assert_eq!(config.clustering.hierarchical_clusters, 3);
        assert_eq!(config.communities.num_communities, 2);
        assert_eq!(config.load.source, GraphSource::Builtin);
    }

    #[test]
    fn zero_communities_rejected_at_run() {
        let args = Args::try_parse_from(["karate-club", "--communities", "0"]).unwrap();
        let (config, _) = args.into_config().unwrap();
        assert!(matches!(
            run_from_config(&config),
            Err(Error::InvalidArgument { name: "num_communities", .. })
        ));
    }

    #[test]
    fn unknown_source_rejected_by_parser() {
        assert!(Args::try_parse_from(["karate-club", "--source", "csv"]).is_err());
        let args = Args::try_parse_from(["karate-club", "--source", "networkx"]).unwrap();
        assert_eq!(args.source, Some(GraphSource::Builtin));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let args =
            Args::try_parse_from(["karate-club", "--config", "/definitely/not/here.json"]).unwrap();
        assert!(matches!(args.into_config(), Err(Error::FileNotFound(_))));
    }
}
