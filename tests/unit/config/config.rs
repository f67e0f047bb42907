use super::*;

#[test]
fn defaults_match_the_classic_layout() {
    let cfg = RenderConfig::default();
    assert_eq!((cfg.width, cfg.height), (1920, 1920));
    assert_eq!(cfg.duration_secs, 15);
    assert_eq!(cfg.fps, 30);
    assert_eq!(cfg.font_size, 280);
    assert_eq!((cfg.arc_radius, cfg.arc_width), (700, 60));
    assert_eq!(cfg.style, Style::Arc);
    assert_eq!(cfg.background_color, Rgb8::BLACK);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = RenderConfig::from_json_str(
        r##"{"width": 800, "height": 600, "style": "plain_digits", "text_color": "#ff0000"}"##,
    )
    .unwrap();
    assert_eq!((cfg.width, cfg.height), (800, 600));
    assert_eq!(cfg.style, Style::PlainDigits);
    assert_eq!(cfg.text_color, Rgb8::new(255, 0, 0));
    assert_eq!(cfg.duration_secs, 15);
}

#[test]
fn bad_json_is_a_serde_error() {
    let err = RenderConfig::from_json_str(r#"{"width": "wide"}"#).unwrap_err();
    assert!(matches!(err, CountdownError::Serde(_)));
}

#[test]
fn validate_rejects_zero_fields() {
    let base = RenderConfig::default();

    for cfg in [
        RenderConfig {
            width: 0,
            ..base.clone()
        },
        RenderConfig {
            fps: 0,
            ..base.clone()
        },
        RenderConfig {
            duration_secs: 0,
            ..base.clone()
        },
        RenderConfig {
            font_size: 0,
            ..base.clone()
        },
        RenderConfig {
            arc_width: 0,
            ..base.clone()
        },
    ] {
        assert!(cfg.validate().is_err(), "{cfg:?}");
    }
}

#[test]
fn arc_fields_only_matter_for_arc_style() {
    let cfg = RenderConfig {
        style: Style::PlainDigits,
        arc_radius: 0,
        arc_width: 0,
        ..RenderConfig::default()
    };
    cfg.validate().unwrap();
}

#[test]
fn default_output_name_encodes_duration_and_width() {
    let cfg = RenderConfig {
        duration_secs: 30,
        width: 1080,
        ..RenderConfig::default()
    };
    assert_eq!(cfg.default_output_file_name(), "countdown_30s_1080p.mp4");
    assert_eq!(
        cfg.default_output_path("out"),
        Path::new("out").join("countdown_30s_1080p.mp4")
    );
}

#[test]
fn bounds_reject_out_of_range_values() {
    let bounds = ConfigBounds::default();
    bounds.check(&RenderConfig::default()).unwrap();

    let cfg = RenderConfig {
        fps: 61,
        ..RenderConfig::default()
    };
    let err = bounds.check(&cfg).unwrap_err();
    assert!(err.to_string().contains("fps 61"));

    let cfg = RenderConfig {
        width: 99,
        ..RenderConfig::default()
    };
    assert!(bounds.check(&cfg).is_err());
}
