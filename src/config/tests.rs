use std::io::Write;

use super::*;

#[test]
fn defaults_describe_a_local_session() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert_eq!(
        settings.pubchem.base_url.as_str(),
        "https://pubchem.ncbi.nlm.nih.gov/rest/pug"
    );
    assert_eq!(settings.pubchem.timeout, Duration::from_secs(15));
    assert_eq!(settings.depiction.provider, DepictionProvider::PubChem);
    assert_eq!(settings.depiction.width.get(), 500);
    assert_eq!(settings.session.page_url.as_str(), "http://localhost:8080/");
    assert_eq!(settings.session.output_dir, PathBuf::from("."));
    assert!(settings.session.clipboard_file.is_none());
    assert!(settings.export.embed_link);
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("info".to_string());
    raw.depiction.provider = Some("pubchem".to_string());

    let overrides = GlobalOverrides {
        log_level: Some("debug".to_string()),
        depiction_provider: Some("cdk-depict".to_string()),
        output_dir: Some(PathBuf::from("/tmp/exports")),
        ..Default::default()
    };

    raw.apply_global_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert_eq!(settings.depiction.provider, DepictionProvider::CdkDepict);
    assert_eq!(settings.session.output_dir, PathBuf::from("/tmp/exports"));
}

#[test]
fn provider_selects_its_default_base_url() {
    let mut raw = RawSettings::default();
    raw.depiction.provider = Some("CDK-Depict".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(
        settings.depiction.base_url.as_str(),
        "https://www.simolecule.com/cdkdepict"
    );
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = GlobalOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_global_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn invalid_values_name_their_key() {
    let cases: [(fn(&mut RawSettings), &str); 5] = [
        (
            |raw| raw.depiction.provider = Some("rdkit".into()),
            "depiction.provider",
        ),
        (|raw| raw.depiction.width = Some(0), "depiction.width"),
        (
            |raw| raw.pubchem.timeout_seconds = Some(0),
            "pubchem.timeout_seconds",
        ),
        (
            |raw| raw.session.page_url = Some("file:///tmp/page".into()),
            "session.page_url",
        ),
        (
            |raw| raw.logging.level = Some("chatty".into()),
            "logging.level",
        ),
    ];

    for (mutate, expected_key) in cases {
        let mut raw = RawSettings::default();
        mutate(&mut raw);
        match Settings::from_raw(raw) {
            Err(LoadError::Invalid { key, .. }) => assert_eq!(key, expected_key),
            other => panic!("expected invalid `{expected_key}`, got {other:?}"),
        }
    }
}

#[test]
fn open_url_seeds_the_page_location() {
    let args = CliArgs::parse_from([
        "chemsketch",
        "open",
        "--url",
        "http://localhost:8080/?smiles=CCO&name=Ethanol",
    ]);
    let mut raw = RawSettings::default();
    if let Some(Command::Open(open)) = args.command.as_ref() {
        raw.apply_open_overrides(open);
    }

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(
        settings.session.page_url.query(),
        Some("smiles=CCO&name=Ethanol")
    );
}

#[test]
fn default_to_no_command() {
    let args = CliArgs::parse_from(["chemsketch"]);
    assert!(args.command.is_none());
}

#[test]
fn parse_render_arguments() {
    let args = CliArgs::parse_from([
        "chemsketch",
        "render",
        "CC(=O)O",
        "--name",
        "Acetic acid",
        "--png",
        "--copy",
        "url",
        "--copy",
        "embed",
        "--output-dir",
        "/tmp/out",
    ]);

    assert_eq!(args.overrides.output_dir, Some(PathBuf::from("/tmp/out")));
    match args.command.expect("render command") {
        Command::Render(render) => {
            assert_eq!(render.smiles, "CC(=O)O");
            assert_eq!(render.name.as_deref(), Some("Acetic acid"));
            assert!(render.exports.png);
            assert!(!render.exports.svg);
            assert_eq!(
                render.exports.copy,
                vec![CopyTarget::Url, CopyTarget::Embed]
            );
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn parse_search_arguments() {
    let args = CliArgs::parse_from(["chemsketch", "search", "aspirin", "--svg"]);

    match args.command.expect("search command") {
        Command::Search(search) => {
            assert_eq!(search.name, "aspirin");
            assert!(search.exports.svg);
            assert!(!search.exports.is_empty());
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn config_file_layer_is_read() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(
        file,
        "[depiction]\nprovider = \"cdk-depict\"\nwidth = 320\n\n[export]\nembed_link = false"
    )
    .expect("write config");

    let args = CliArgs::parse_from([
        "chemsketch",
        "--config-file",
        file.path().to_str().expect("utf-8 path"),
        "shell",
    ]);
    let settings = load(&args).expect("settings");

    assert_eq!(settings.depiction.provider, DepictionProvider::CdkDepict);
    assert_eq!(settings.depiction.width.get(), 320);
    assert!(!settings.export.embed_link);
}
