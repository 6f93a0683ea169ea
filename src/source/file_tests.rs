//! Tests for file-backed sources.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

use crate::flag::{ArgsError, FlagSet, Handle, settings};

use super::{FileSource, Format, Provider};

const NO_ARGS: [&str; 0] = [];

/// Writes `content` to `name` inside a fresh temporary directory.
fn write_config(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path)
}

fn path_handle(path: &Path) -> Handle<String> {
    Handle::new(path.display().to_string())
}

fn quiet_set() -> FlagSet {
    let mut fs = FlagSet::new();
    fs.set_output(std::io::sink());
    fs
}

mod formats {
    use super::*;

    #[test]
    fn inferred_from_extension() {
        assert_eq!(Format::from_path(Path::new("a.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("a.yaml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("a.YML")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("a.toml")), Some(Format::Toml));
        assert_eq!(Format::from_path(Path::new("a.ini")), None);
        assert_eq!(Format::from_path(Path::new("config")), None);
    }

    #[test]
    fn display_is_lowercase_name() {
        assert_eq!(Format::Yaml.to_string(), "yaml");
    }
}

mod json_files {
    use super::*;

    #[test]
    fn applies_registered_keys_and_ignores_the_rest() {
        let (_dir, path) = write_config(
            "app.json",
            r#"{"port": "8888", "debug": true, "nested": {"level": "info"}, "extra": 1}"#,
        );
        let mut fs = quiet_set();
        let port = fs.string("port", "9999", "listen port").unwrap();
        let debug = fs.bool("debug", false, "debug").unwrap();
        let level = fs.string("nested.level", "warn", "log level").unwrap();

        fs.parse(NO_ARGS, [settings::json(&path_handle(&path))]).unwrap();

        assert_eq!(port.get(), "8888");
        assert!(debug.get());
        assert_eq!(level.get(), "info");
    }

    #[test]
    fn command_line_keeps_precedence() {
        let (_dir, path) = write_config("app.json", r#"{"port": "8888"}"#);
        let mut fs = quiet_set();
        let port = fs.string("port", "9999", "listen port").unwrap();

        fs.parse(["--port", "7777"], [settings::json(&path_handle(&path))])
            .unwrap();

        assert_eq!(port.get(), "7777");
    }

    #[test]
    fn value_type_errors_abort() {
        let (_dir, path) = write_config("app.json", r#"{"workers": "many"}"#);
        let mut fs = quiet_set();
        fs.uint("workers", 1, "workers").unwrap();

        let err = fs
            .parse(NO_ARGS, [settings::json(&path_handle(&path))])
            .unwrap_err();

        assert!(matches!(err, ArgsError::InvalidSourceValue { .. }));
    }
}

mod lazy_paths {
    use super::*;

    #[test]
    fn path_is_read_at_resolution_time() {
        let (_dir, path) = write_config("app.yaml", "port: 8888\n");
        let mut fs = quiet_set();
        let config = fs.string("config,c", "", "config file").unwrap();
        let port = fs.string("port", "9999", "listen port").unwrap();

        fs.parse(
            ["-c", path.to_str().unwrap()],
            [settings::yaml(&config)],
        )
        .unwrap();

        assert_eq!(port.get(), "8888");
    }

    #[test]
    fn empty_path_is_a_no_op() {
        let mut fs = quiet_set();
        let config = fs.string("config", "", "config file").unwrap();
        let port = fs.string("port", "9999", "listen port").unwrap();

        fs.parse(
            NO_ARGS,
            [settings::json(&config), settings::yaml(&config), settings::toml(&config)],
        )
        .unwrap();

        assert_eq!(port.get(), "9999");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let mut fs = quiet_set();
        fs.string("port", "", "port").unwrap();

        let err = fs
            .parse(NO_ARGS, [settings::toml(&path_handle(&missing))])
            .unwrap_err();

        assert!(matches!(err, ArgsError::FileRead { ref path, .. } if *path == missing));
    }
}

mod chained_sources {
    use super::*;

    #[test]
    fn registration_order_decides_between_files() {
        let (_json_dir, json) = write_config("a.json", r#"{"port": "1", "host": "json"}"#);
        let (_toml_dir, toml) = write_config("b.toml", "port = \"2\"\nname = \"toml\"\n");
        let mut fs = quiet_set();
        let port = fs.string("port", "", "port").unwrap();
        let host = fs.string("host", "", "host").unwrap();
        let name = fs.string("name", "", "name").unwrap();

        fs.parse(
            NO_ARGS,
            [
                settings::toml(&path_handle(&toml)),
                settings::json(&path_handle(&json)),
            ],
        )
        .unwrap();

        assert_eq!(port.get(), "2");
        assert_eq!(host.get(), "json");
        assert_eq!(name.get(), "toml");
    }

    #[test]
    fn decode_failure_keeps_earlier_sources() {
        let (_good_dir, good) = write_config("good.toml", "host = \"example.org\"\n");
        let (_bad_dir, bad) = write_config("bad.json", "{not json");
        let mut fs = quiet_set();
        let host = fs.string("host", "", "host").unwrap();

        let err = fs
            .parse(
                NO_ARGS,
                [
                    settings::toml(&path_handle(&good)),
                    settings::json(&path_handle(&bad)),
                ],
            )
            .unwrap_err();

        assert!(matches!(err, ArgsError::Decode { format: "json", .. }));
        assert_eq!(host.get(), "example.org");
    }
}

mod inferred_sources {
    use super::*;

    #[test]
    fn picks_decoder_by_extension() {
        let (_dir, path) = write_config("app.toml", "[db]\nurl = \"postgres://x\"\n");
        let mut fs = quiet_set();
        let url = fs.string("db.url", "", "database url").unwrap();

        fs.parse(NO_ARGS, [settings::file(&path_handle(&path))]).unwrap();

        assert_eq!(url.get(), "postgres://x");
    }

    #[test]
    fn unknown_extension_is_an_error() {
        let (_dir, path) = write_config("app.ini", "port=1\n");
        let source = FileSource::infer(path_handle(&path));

        let err = source.provide(&mut |_: &str, _: &str| Ok(())).unwrap_err();

        assert!(matches!(err, ArgsError::UnknownFormat { .. }));
        assert_eq!(source.format(), None);
        assert_eq!(source.name(), "config file");
    }

    #[test]
    fn explicit_source_reports_its_format() {
        let source = FileSource::yaml(Handle::default());
        assert_eq!(source.format(), Some(Format::Yaml));
        assert_eq!(source.name(), "yaml file");
    }
}
