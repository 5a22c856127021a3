use std::fmt::Write as _;
use std::hash::Hasher;

use storefront_core::{CartUrlTable, Fragrance, LookupKey, Plan, StorefrontConfig, default_table};
use twox_hash::XxHash64;

const TABLE_SNAPSHOT_HASH: u64 = 0x4b92_e94a_f805_32e1;

#[test]
fn cart_table_snapshot_stable() {
    let table = CartUrlTable::load_from_static();
    let mut canonical = format!("fallback: {}\n", table.fallback);
    for (key, url) in &table.urls {
        writeln!(canonical, "{key} -> {url}").unwrap();
    }
    let digest = snapshot_hash(canonical.as_bytes());
    assert_eq!(
        digest, TABLE_SNAPSHOT_HASH,
        "cart url table snapshot changed\n{canonical}"
    );
}

#[test]
fn every_declared_key_has_its_own_url() {
    let table = default_table();
    for plan in Plan::ALL {
        for fragrance in Fragrance::ALL {
            let key = LookupKey::of(plan, fragrance);
            let url = table.get(&key).expect("declared key present");
            assert!(url.ends_with(&format!("/cart/{plan}-{fragrance}")));
        }
    }
}

#[test]
fn storefront_config_data_parses() {
    let cfg = StorefrontConfig::load_from_static();
    assert_eq!(cfg.restore_delays(), vec![50, 200]);
    assert_eq!(cfg.counter_duration_ms, 2_000);
}

fn snapshot_hash(bytes: &[u8]) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(bytes);
    hasher.finish()
}
