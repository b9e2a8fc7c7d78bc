// Forward OPENROUTER_* entries from a local `.env` as compile-time env so
// `option_env!` can supply build-time defaults. Variables already exported
// in the build environment are left alone.

const FORWARDED: &[&str] = &["OPENROUTER_API_KEY", "OPENROUTER_MODEL"];

fn main() {
    for key in FORWARDED {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    println!("cargo:rerun-if-changed=.env");

    let entries = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim().trim_matches('"')));

    for (key, value) in entries {
        if FORWARDED.contains(&key) && std::env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
