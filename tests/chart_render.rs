use pypi_rs::chart::{self, DEFAULT_MAX_KEY_WIDTH};

fn data(pairs: &[(&str, u64)]) -> Vec<(String, u64)> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn rows_are_aligned_and_scaled() {
    let d = data(&[("1.0", 10), ("2.0", 30), ("10.0", 1_234)]);
    let out = chart::render(&d, 50, DEFAULT_MAX_KEY_WIDTH);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    // bar area = 50 - 3 - (4 + 3 + 5 + 3) = 32
    assert_eq!(lines[0], format!("1.0  [    10 ] {}", "*".repeat(1)));
    assert_eq!(lines[1], format!("2.0  [    30 ] {}", "*".repeat(1)));
    assert_eq!(lines[2], format!("10.0 [ 1,234 ] {}", "*".repeat(32)));
    assert!(!out.ends_with('\n'));
}

#[test]
fn keeps_input_order() {
    let d = data(&[("z", 1), ("a", 3), ("m", 2)]);
    let out = chart::render(&d, 40, DEFAULT_MAX_KEY_WIDTH);
    let keys: Vec<&str> = out.lines().map(|l| &l[..1]).collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn all_zero_values_render_empty_bars() {
    let d = data(&[("1.0", 0), ("2.0", 0)]);
    let layout = chart::layout(&d, 80, DEFAULT_MAX_KEY_WIDTH);
    let rows = chart::chart_rows(&d, &layout);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.bar_length == 0));
    let out = chart::render(&d, 80, DEFAULT_MAX_KEY_WIDTH);
    assert_eq!(out, "1.0 [ 0 ] \n2.0 [ 0 ] ");
}

#[test]
fn narrow_terminal_clamps_bars_to_zero() {
    let d = data(&[("version-one", 1_000_000), ("v2", 5)]);
    for width in [0, 5, 20] {
        let layout = chart::layout(&d, width, DEFAULT_MAX_KEY_WIDTH);
        assert_eq!(layout.bar_width, 0);
        let out = chart::render(&d, width, DEFAULT_MAX_KEY_WIDTH);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "version-one [ 1,000,000 ] ");
        assert_eq!(lines[1], "v2          [         5 ] ");
    }
}

#[test]
fn key_width_is_capped() {
    let d = data(&[("a-very-long-release-label", 3)]);
    let out = chart::render(&d, 40, 6);
    assert!(out.starts_with("a-very [ 3 ] "));
}

#[test]
fn render_is_deterministic() {
    let d = data(&[("1.0", 17), ("1.1", 4_242), ("2.0", 999)]);
    assert_eq!(chart::render(&d, 77, 20), chart::render(&d, 77, 20));
}

#[test]
fn empty_input_renders_nothing() {
    assert_eq!(chart::render(&[], 80, DEFAULT_MAX_KEY_WIDTH), "");
}
