use dotenvy::dotenv;
use lazy_static::lazy_static;
use secrecy::Secret;
use std::env as std_env;

lazy_static! {
    pub static ref SECRET_KEY: Secret<String> = set_secret_key();
    pub static ref DATABASE_URL: Secret<String> = get_db_url();
    pub static ref DUTY_ACTIVITIES: Vec<String> =
        load_list_or_default(env::DUTY_ACTIVITIES_ENV_VAR, DEFAULT_DUTY_ACTIVITIES);
    pub static ref OTHER_ACTIVITIES: Vec<String> =
        load_list_or_default(env::OTHER_ACTIVITIES_ENV_VAR, DEFAULT_OTHER_ACTIVITIES);
}

fn load_env() {
    dotenv().ok();
}

fn set_secret_key() -> Secret<String> {
    load_env();
    let secret = std_env::var(env::SECRET_KEY_ENV_VAR)
        .expect("SECRET_KEY must be set.");
    if secret.is_empty() {
        panic!("SECRET_KEY must not be empty.");
    }
    Secret::new(secret)
}

fn get_db_url() -> Secret<String> {
    load_env();
    let db_url = std_env::var(env::DATABASE_URL_ENV_VAR)
        .expect("DATABASE_URL must be set.");
    if db_url.is_empty() {
        panic!("DATABASE_URL must not be empty.");
    }
    Secret::new(db_url)
}

fn load_list_or_default(variable_name: &str, default_value: &str) -> Vec<String> {
    load_env();

    let value = match std_env::var(variable_name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => String::from(default_value),
    };
    parse_list(&value)
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

pub mod env {
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const SECRET_KEY_ENV_VAR: &str = "SECRET_KEY";
    pub const DUTY_ACTIVITIES_ENV_VAR: &str = "DUTY_ACTIVITIES";
    pub const OTHER_ACTIVITIES_ENV_VAR: &str = "OTHER_ACTIVITIES";
}

pub const DEFAULT_DUTY_ACTIVITIES: &str = "ood,safety";
pub const DEFAULT_OTHER_ACTIVITIES: &str = "race";

pub const ALL_MEMBERS_LABEL: &str = "All members";

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}

#[test]
fn test_parse_list() {
    assert_eq!(parse_list("ood,safety"), vec!["ood", "safety"]);
    assert_eq!(parse_list(" ood , ,safety ,"), vec!["ood", "safety"]);
    assert!(parse_list("").is_empty());
}
