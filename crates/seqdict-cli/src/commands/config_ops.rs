use std::fs;

pub fn settings_export() {
    print!("{}", seqdict_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        seqdict_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: search.max_expansions={}, search.max_cost={}, cover.combine_matches={}, cover.oversample={}",
        s.search.max_expansions,
        s.search
            .max_cost
            .map_or_else(|| "none".to_string(), |c| c.to_string()),
        s.cover.combine_matches,
        s.cover.oversample
    );
}

/// Load a custom settings file before any query touches the defaults.
pub fn settings_load(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(
        seqdict_core::settings::init_custom(content),
        "Error loading settings: {}"
    );
}
