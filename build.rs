use std::env;

/// Build-time parameter defaults: (variable, fallback)
const PARAMS: &[(&str, &str)] = &[
    ("PARAMS_STORAGE", "fixed-slot"),
    ("PARAMS_RANDOM_MAC", "false"),
    ("PARAMS_PERSIST_DEFAULTS", "true"),
    ("PARAMS_CHANNEL", "26"),
    ("PARAMS_PANID", "0xABCD"),
    ("PARAMS_PANADDR", "0"),
    ("PARAMS_TXPOWER", "0"),
    ("PARAMS_EUI64", "02:00:00:ff:fe:00:00:01"),
    ("PARAMS_SERVER_NAME", "micropnp"),
    ("PARAMS_DOMAIN_NAME", "localhost"),
];

fn main() {
    // Radio parameter defaults, used whenever storage is empty or corrupt.
    // Values are passed through unchecked and parsed at runtime by
    // `parameters::build_config`; bad values fall back to the built-in
    // defaults with a logged warning.
    for (name, fallback) in PARAMS {
        match env::var(name) {
            Ok(value) => {
                println!("cargo:rustc-env={}={}", name, value);
                println!("cargo:warning=Using {} from environment: {}", name, value);
            }
            Err(_) => println!("cargo:rustc-env={}={}", name, fallback),
        }
    }

    // Rerun if environment variables change
    for (name, _) in PARAMS {
        println!("cargo:rerun-if-env-changed={}", name);
    }
}
