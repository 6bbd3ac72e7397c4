//! Configuration files and the fixture-backed store

#[cfg(test)]
mod tests {
    use recordops::config::Config;
    use recordops::core::record::{Fixture, RecordStore};
    use recordops::server::{ServerBuilder, load_store};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_config_points_at_fixture() {
        let fixture = write_temp(crate::common::fixtures::RECORDS_YAML);
        let config_file = write_temp(&format!(
            "store:\n  fixture_path: \"{}\"\nrecord_types:\n  VIP: customer\n",
            fixture.path().display()
        ));

        let config = Config::from_file(config_file.path()).await.unwrap();
        let store = load_store(&config).await.unwrap();
        assert_eq!(store.record_count(), 3);

        let server = ServerBuilder::new().with_config(config).build().await.unwrap();
        let commands = &server.state().commands;
        assert_eq!(commands.record_types.resolve("VIP"), "customer");
        assert!(commands.store.load("customer", "123").is_ok());
    }

    #[tokio::test]
    async fn test_missing_fixture_fails_build() {
        let config_file = write_temp("store:\n  fixture_path: \"/nonexistent/records.yaml\"\n");
        let config = Config::from_file(config_file.path()).await.unwrap();
        assert!(ServerBuilder::new().with_config(config).build().await.is_err());
    }

    #[tokio::test]
    async fn test_fixture_from_file_rejects_unknown_fields() {
        let fixture = write_temp(
            "record_types:\n  note:\n    fields:\n      - { id: title, label: Title }\n\
             records:\n  - type: note\n    id: \"1\"\n    fields:\n      body: x\n",
        );
        let parsed = Fixture::from_file(fixture.path()).await.unwrap();
        assert!(parsed.into_store().is_err());
    }

    #[tokio::test]
    async fn test_invalid_runner_endpoint_is_rejected() {
        let config_file = write_temp("runner:\n  endpoint: \"ftp://example.com\"\n");
        assert!(Config::from_file(config_file.path()).await.is_err());
    }
}
