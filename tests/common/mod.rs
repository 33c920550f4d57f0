//! Shared fixtures for integration tests.

use anyhow::Result;
use compass_core::{parse_payload, Explorer};

/// Installs a test-writer subscriber so `RUST_LOG=debug cargo test` shows
/// core tracing output. Safe to call from every test.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A feature-service response the way the real endpoint shapes it: envelope
/// fields we ignore, escaped text, a record with no `GlobalID`, and a record
/// missing one coordinate component.
pub fn sample_payload() -> &'static str {
    r#"{
        "objectIdFieldName": "OBJECTID",
        "features": [
            {"attributes": {
                "OBJECTID": 1,
                "GlobalID": "{2F9A41C7-0001-4ADE-9C7A-000000000001}",
                "name": "Caf&eacute; Letka",
                "text": "Coffee &amp; cake",
                "address_street": "Letensk&aacute; 12",
                "address_city": "Praha",
                "contact_phone": "+420 111 222 333",
                "url": "https://example.com/?a=1&amp;b=2",
                "latitude": 50.0970,
                "longitude": 14.4200
            }},
            {"attributes": {
                "OBJECTID": 2,
                "GlobalID": "{2F9A41C7-0002-4ADE-9C7A-000000000002}",
                "name": "archive",
                "latitude": 50.0870,
                "longitude": 14.4210
            }},
            {"attributes": {
                "OBJECTID": 3,
                "name": "Bez polohy",
                "text": "No GlobalID and no usable position",
                "latitude": 50.1
            }}
        ]
    }"#
}

/// Decodes the sample payload into a fresh explorer through the normal
/// fetch lifecycle.
pub fn load_sample(explorer: &mut Explorer) -> Result<()> {
    let generation = explorer.begin_fetch();
    let records = parse_payload(sample_payload().as_bytes())?;
    explorer.apply_fetch(generation, Ok(records));
    Ok(())
}
