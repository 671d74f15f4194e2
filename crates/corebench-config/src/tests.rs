//! Tests for battery configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        warmup_count = 2
        run_count = 10
        parallel = true
        max_depth = 500
        csv_output = "results.csv"

        [[benchmarks]]
        kind = "list"

        [[benchmarks]]
        kind = "mandelbrot"
        size = 1

        [[benchmarks]]
        kind = "sieve"
        bound = 100
    "#;

    let config = BatteryConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.warmup_count, 2);
    assert_eq!(config.run_count, 10);
    assert!(config.parallel);
    assert_eq!(config.max_depth, 500);
    assert_eq!(config.csv_output.as_deref(), Some("results.csv"));
    assert_eq!(
        config.benchmarks,
        vec![
            BenchmarkSpec::List,
            BenchmarkSpec::Mandelbrot { size: 1 },
            BenchmarkSpec::Sieve { bound: 100 },
        ]
    );
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        run_count: 4
        benchmarks:
          - kind: queens
          - kind: tower
            disks: 5
    "#;

    let config = BatteryConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.run_count, 4);
    assert_eq!(config.warmup_count, 1);
    assert_eq!(
        config.benchmarks,
        vec![BenchmarkSpec::Queens, BenchmarkSpec::Tower { disks: 5 }]
    );
}

#[test]
fn test_defaults() {
    let config = BatteryConfig::from_toml_str("").unwrap();
    assert_eq!(config, BatteryConfig::default());
    assert_eq!(config.benchmarks, BenchmarkSpec::canonical_battery());
    assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    assert!(!config.parallel);
}

#[test]
fn test_parameter_defaults() {
    let config = BatteryConfig::from_toml_str(
        r#"
        [[benchmarks]]
        kind = "mandelbrot"

        [[benchmarks]]
        kind = "tower"
    "#,
    )
    .unwrap();
    assert_eq!(
        config.benchmarks,
        vec![
            BenchmarkSpec::Mandelbrot { size: 500 },
            BenchmarkSpec::Tower { disks: 13 },
        ]
    );
}

#[test]
fn test_unknown_mandelbrot_size_rejected() {
    let err = BatteryConfig::from_toml_str(
        r#"
        [[benchmarks]]
        kind = "mandelbrot"
        size = 640
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_oversized_parameters_rejected() {
    let err = BatteryConfig::from_toml_str(
        r#"
        [[benchmarks]]
        kind = "sieve"
        bound = 20000000
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = BatteryConfig::from_yaml_str("benchmarks:\n  - kind: tower\n    disks: 40\n")
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let edge = BatteryConfig::new().with_benchmarks(vec![
        BenchmarkSpec::Sieve {
            bound: sieve::MAX_BOUND,
        },
        BenchmarkSpec::Tower {
            disks: tower::MAX_DISKS,
        },
    ]);
    assert!(edge.validate().is_ok());
}

#[test]
fn test_zero_runs_rejected() {
    let err = BatteryConfig::from_toml_str("run_count = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_unknown_kind_rejected() {
    let err = BatteryConfig::from_toml_str(
        r#"
        [[benchmarks]]
        kind = "fannkuch"
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_builder() {
    let config = BatteryConfig::new()
        .with_warmup_count(0)
        .with_run_count(7)
        .with_parallel(true)
        .with_benchmarks(vec![BenchmarkSpec::Permute])
        .with_markdown_output("report.md");

    assert_eq!(config.warmup_count, 0);
    assert_eq!(config.run_count, 7);
    assert!(config.parallel);
    assert_eq!(config.benchmarks, vec![BenchmarkSpec::Permute]);
    assert_eq!(config.markdown_output.as_deref(), Some("report.md"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_by_extension() {
    let dir = tempfile::tempdir().unwrap();

    let toml_path = dir.path().join("battery.toml");
    std::fs::write(&toml_path, "run_count = 2").unwrap();
    assert_eq!(BatteryConfig::load(&toml_path).unwrap().run_count, 2);

    let yaml_path = dir.path().join("battery.yml");
    std::fs::write(&yaml_path, "run_count: 6").unwrap();
    assert_eq!(BatteryConfig::load(&yaml_path).unwrap().run_count, 6);

    let missing = dir.path().join("missing.toml");
    assert!(matches!(
        BatteryConfig::load(missing),
        Err(ConfigError::Io(_))
    ));
}

mod spec_parsing {
    use super::*;

    #[test]
    fn test_plain_names() {
        assert_eq!("list".parse::<BenchmarkSpec>().unwrap(), BenchmarkSpec::List);
        assert_eq!("Queens".parse::<BenchmarkSpec>().unwrap(), BenchmarkSpec::Queens);
        assert_eq!(
            "sieve".parse::<BenchmarkSpec>().unwrap(),
            BenchmarkSpec::Sieve { bound: 5000 }
        );
    }

    #[test]
    fn test_with_parameter() {
        assert_eq!(
            "mandelbrot:750".parse::<BenchmarkSpec>().unwrap(),
            BenchmarkSpec::Mandelbrot { size: 750 }
        );
        assert_eq!(
            "tower:3".parse::<BenchmarkSpec>().unwrap(),
            BenchmarkSpec::Tower { disks: 3 }
        );
    }

    #[test]
    fn test_rejections() {
        assert!("mandelbrot:99".parse::<BenchmarkSpec>().is_err());
        assert!("sieve:many".parse::<BenchmarkSpec>().is_err());
        assert!("permute:3".parse::<BenchmarkSpec>().is_err());
        assert!("hanoi".parse::<BenchmarkSpec>().is_err());
        assert!("tower:0".parse::<BenchmarkSpec>().is_err());
        assert!("tower:63".parse::<BenchmarkSpec>().is_err());
        assert!("sieve:18446744073709551615".parse::<BenchmarkSpec>().is_err());
        assert!("sieve:10000001".parse::<BenchmarkSpec>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for spec in BenchmarkSpec::canonical_battery() {
            let text = spec.to_string();
            assert_eq!(text.parse::<BenchmarkSpec>().unwrap(), spec);
        }
    }
}
