use super::*;

#[test]
fn new_trims_trailing_slashes() {
    assert_eq!(ApiConfig::new("https://api.example.test//").base_url, "https://api.example.test");
}

#[test]
fn default_targets_local_api() {
    assert_eq!(ApiConfig::default().base_url, DEFAULT_API_URL);
}

#[test]
fn url_joins_base_and_path() {
    let config = ApiConfig::new("http://localhost:8081/");
    assert_eq!(config.url("/companies/5"), "http://localhost:8081/companies/5");
}
