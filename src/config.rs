use clap::Parser;

use crate::data::loader::Source;

/// Command-line configuration. Logging is controlled by `RUST_LOG`.
#[derive(Parser, Debug, Clone)]
#[command(name = "papertable", version, about = "Browse and filter a bibliography")]
pub struct Args {
    /// Records resource: a .json / .csv / .parquet path or an http(s) URL
    #[arg(long, default_value = "data.json")]
    pub data: String,

    /// Ordering descriptor for filter groups, keys and buttons
    #[arg(long, default_value = "ordering.json")]
    pub ordering: String,

    /// Ignore any ordering descriptor and derive filters from the data
    #[arg(long)]
    pub no_ordering: bool,

    /// Column to sort the table by
    #[arg(long, default_value = "Author")]
    pub sort: String,

    /// Sort descending instead of ascending
    #[arg(long)]
    pub descending: bool,
}

impl Args {
    pub fn records_source(&self) -> Source {
        Source::parse(&self.data)
    }

    pub fn ordering_source(&self) -> Option<Source> {
        (!self.no_ordering).then(|| Source::parse(&self.ordering))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["papertable"]).unwrap();
        assert_eq!(args.records_source(), Source::File(PathBuf::from("data.json")));
        assert_eq!(args.ordering_source(), Some(Source::File(PathBuf::from("ordering.json"))));
        assert_eq!(args.sort, "Author");
        assert!(!args.descending);
    }

    #[test]
    fn test_url_and_no_ordering() {
        let args = Args::try_parse_from([
            "papertable",
            "--data",
            "https://example.org/data.json",
            "--no-ordering",
            "--sort",
            "Year",
            "--descending",
        ])
        .unwrap();
        assert_eq!(args.records_source(), Source::Url("https://example.org/data.json".into()));
        assert_eq!(args.ordering_source(), None);
        assert_eq!(args.sort, "Year");
        assert!(args.descending);
    }
}
