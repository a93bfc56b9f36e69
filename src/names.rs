//! Azure resource naming.
//!
//! Storage accounts and Key Vaults have global namespaces and tight length
//! limits (3-24 characters), so their names are built from an abbreviated
//! app name plus the environment, padded with random hex to 24 characters.

use uuid::Uuid;

/// Maximum length of storage account and Key Vault names.
pub const MAX_RESOURCE_NAME: usize = 24;

const MIN_RESOURCE_NAME: usize = 3;

/// Fixed abbreviations for common words in application names.
const ABBREVIATIONS: &[(&str, &str)] = &[
    // service types
    ("service", "svc"),
    ("api", "api"),
    ("application", "app"),
    ("adapter", "adp"),
    ("integration", "int"),
    ("interface", "intf"),
    ("gateway", "gw"),
    ("proxy", "prx"),
    ("server", "srv"),
    ("client", "cli"),
    ("worker", "wkr"),
    ("daemon", "dmn"),
    ("scheduler", "sch"),
    ("processor", "prc"),
    ("handler", "hdlr"),
    ("listener", "lsnr"),
    ("monitor", "mon"),
    ("controller", "ctrl"),
    ("middleware", "mw"),
    // business domains
    ("customer", "cst"),
    ("payment", "pmt"),
    ("account", "acc"),
    ("transaction", "trx"),
    ("order", "ord"),
    ("invoice", "inv"),
    ("product", "prod"),
    ("inventory", "inv"),
    ("catalog", "cat"),
    ("document", "doc"),
    ("message", "msg"),
    ("notification", "notif"),
    ("analytics", "anly"),
    ("reporting", "rpt"),
    ("billing", "bill"),
    ("shipping", "ship"),
    ("tracking", "trk"),
    ("marketing", "mkt"),
    ("authentication", "auth"),
    ("authorization", "authz"),
    // operations
    ("manager", "mgr"),
    ("processing", "prc"),
    ("generator", "gen"),
    ("validator", "val"),
    ("converter", "conv"),
    ("transformer", "trf"),
    ("calculator", "calc"),
    ("formatter", "fmt"),
    ("publisher", "pub"),
    ("subscriber", "sub"),
    ("synchronizer", "sync"),
    ("orchestrator", "orch"),
    // data
    ("database", "db"),
    ("repository", "repo"),
    ("storage", "store"),
    ("cache", "cache"),
    ("queue", "q"),
    ("stream", "strm"),
    ("event", "evt"),
    ("config", "cfg"),
    ("settings", "set"),
    ("metadata", "meta"),
    // environments
    ("development", "dev"),
    ("production", "prod"),
    ("test", "test"),
    ("staging", "stg"),
    ("sandbox", "sbx"),
    ("quality", "qa"),
    ("acceptance", "uat"),
    ("preview", "prev"),
    ("performance", "perf"),
    // prefixes and suffixes
    ("internal", "int"),
    ("external", "ext"),
    ("public", "pub"),
    ("private", "prv"),
    ("shared", "shd"),
    ("common", "cmn"),
    ("core", "core"),
    ("legacy", "leg"),
    ("utility", "util"),
    ("helper", "hlpr"),
    ("wrapper", "wrap"),
    ("engine", "eng"),
    ("system", "sys"),
];

/// Lowercase and replace underscores with hyphens.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace('_', "-")
}

/// Abbreviate a hyphen- or underscore-separated name, truncated to `max_len`.
///
/// Known words use [`ABBREVIATIONS`]. Other words keep their first letter
/// plus up to two following consonants or digits.
pub fn short_name(name: &str, max_len: usize) -> String {
    let normalized = normalize_name(name);
    let joined: String = normalized
        .split('-')
        .filter(|word| !word.is_empty())
        .map(abbreviate)
        .collect();
    joined.chars().take(max_len).collect()
}

fn abbreviate(word: &str) -> String {
    if let Some((_, short)) = ABBREVIATIONS.iter().find(|(long, _)| *long == word) {
        return (*short).to_string();
    }
    let mut chars = word.chars();
    let mut out: String = chars.next().into_iter().collect();
    out.extend(
        chars
            .filter(|c| c.is_ascii_digit() || (c.is_alphabetic() && !"aeiou".contains(*c)))
            .take(2),
    );
    out
}

/// Storage account name: lowercase letters and digits only.
pub fn storage_account_name(app_name: &str, environment: &str) -> String {
    storage_account_name_with(app_name, environment, &random_hex())
}

/// [`storage_account_name`] with an explicit padding source.
pub fn storage_account_name_with(app_name: &str, environment: &str, padding: &str) -> String {
    let name: String = format!("{}{environment}", short_name(app_name, 20))
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();
    pad(ensure_min_len(name), padding)
}

/// Key Vault name: lowercase letters, digits and single inner hyphens.
pub fn key_vault_name(app_name: &str, environment: &str) -> String {
    key_vault_name_with(app_name, environment, &random_hex())
}

/// [`key_vault_name`] with an explicit padding source.
pub fn key_vault_name_with(app_name: &str, environment: &str, padding: &str) -> String {
    let filtered: String = format!("{}{environment}kv", short_name(app_name, 19))
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();
    let collapsed = filtered
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    pad(ensure_min_len(collapsed), padding)
}

fn ensure_min_len(mut name: String) -> String {
    while name.len() < MIN_RESOURCE_NAME {
        name.push('x');
    }
    name
}

/// Truncate or pad `name` to exactly [`MAX_RESOURCE_NAME`] characters.
fn pad(mut name: String, padding: &str) -> String {
    if name.len() >= MAX_RESOURCE_NAME {
        name.truncate(MAX_RESOURCE_NAME);
        return name;
    }
    let needed = MAX_RESOURCE_NAME - name.len();
    name.extend(padding.chars().take(needed));
    name
}

fn random_hex() -> String {
    Uuid::new_v4().simple().to_string()
}
