use std::{fs, process::Command};

#[test]
fn runs_the_built_in_arena() {
    let output = Command::new(env!("CARGO_BIN_EXE_cat-bomber"))
        .args(["--ticks", "40", "--seed", "7"])
        .output()
        .expect("failed to run cat-bomber");

    assert!(output.status.success(), "cat-bomber should exit cleanly");
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert!(stdout.starts_with("###############\n"), "{stdout}");
    assert!(stdout.contains("ticks: 40"), "{stdout}");
}

#[test]
fn same_seed_prints_the_same_round() {
    let run = || {
        Command::new(env!("CARGO_BIN_EXE_cat-bomber"))
            .args(["--ticks", "200", "--seed", "1234", "--show-distances"])
            .output()
            .expect("failed to run cat-bomber")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn malformed_levels_abort_before_the_round() {
    let dir = std::env::temp_dir().join(format!("cat-bomber-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir");
    let level = dir.join("bad.txt");
    fs::write(&level, "#1#\n#1#\n").expect("write level");

    let output = Command::new(env!("CARGO_BIN_EXE_cat-bomber"))
        .arg("--level")
        .arg(&level)
        .output()
        .expect("failed to run cat-bomber");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("player 1 spawns twice"), "{stderr}");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unknown_config_keys_are_reported() {
    let dir = std::env::temp_dir().join(format!("cat-bomber-config-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir");
    let config = dir.join("tuning.toml");
    fs::write(&config, "bomb_powr = 3\n").expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_cat-bomber"))
        .arg("--config")
        .arg(&config)
        .output()
        .expect("failed to run cat-bomber");

    assert!(!output.status.success());
    let _ = fs::remove_dir_all(&dir);
}
