//! Fixture loading shared by unit tests

use serde::Deserialize;

use crate::coins::CoinFamily;
use crate::networks::Network;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFixture {
    pub description: String,
    pub network: String,
    pub hex: String,
    pub id: String,
    pub version: i32,
    pub locktime: u32,
    pub input_count: usize,
    pub output_count: usize,
    pub has_witnesses: bool,
    pub is_coinbase: bool,
    pub byte_length: usize,
    pub byte_length_no_witness: usize,
    pub weight: usize,
    pub virtual_size: usize,
    pub version_group_id: Option<u32>,
    pub expiry: Option<u32>,
    pub value_balance: Option<i64>,
    pub spend_count: Option<usize>,
    pub shielded_output_count: Option<usize>,
    pub joinsplit_count: Option<usize>,
    pub dash_type: Option<u16>,
    pub dash_payload: Option<String>,
    pub timestamp: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SighashVector {
    pub in_index: usize,
    pub script: String,
    pub hash_type: u32,
    pub value: Option<u64>,
    pub hash: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SighashFixture {
    pub fixture: String,
    pub network: String,
    pub hex: String,
    #[serde(default)]
    pub legacy: Vec<SighashVector>,
    #[serde(default)]
    pub witness: Vec<SighashVector>,
}

pub fn family_for(network: &str) -> CoinFamily {
    Network::from_coin_name(network)
        .unwrap_or_else(|| panic!("Unknown network in fixture: {}", network))
        .family()
}

impl TransactionFixture {
    pub fn family(&self) -> CoinFamily {
        family_for(&self.network)
    }
}

impl SighashFixture {
    pub fn family(&self) -> CoinFamily {
        family_for(&self.network)
    }
}

fn fixture_dir(kind: &str) -> String {
    format!("{}/test/fixtures/{}", env!("CARGO_MANIFEST_DIR"), kind)
}

fn load_fixture_dir<T: serde::de::DeserializeOwned>(kind: &str) -> Vec<(String, T)> {
    let fixtures_dir = fixture_dir(kind);
    let entries = std::fs::read_dir(&fixtures_dir)
        .unwrap_or_else(|_| panic!("Failed to read fixtures directory: {}", fixtures_dir));

    let mut fixture_files: Vec<_> = entries
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension()? == "json" {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    fixture_files.sort();

    assert!(
        !fixture_files.is_empty(),
        "No fixture files found in {}",
        fixtures_dir
    );

    fixture_files
        .into_iter()
        .map(|path| {
            let content = std::fs::read_to_string(&path)
                .unwrap_or_else(|_| panic!("Failed to read fixture: {:?}", path));
            let fixture = serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse fixture {:?}: {}", path, e));
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            (name, fixture)
        })
        .collect()
}

pub fn load_transaction_fixtures() -> Vec<(String, TransactionFixture)> {
    load_fixture_dir("transactions")
}

pub fn load_transaction_fixture(name: &str) -> TransactionFixture {
    load_transaction_fixtures()
        .into_iter()
        .find(|(n, _)| n == name)
        .map(|(_, f)| f)
        .unwrap_or_else(|| panic!("No transaction fixture named {}", name))
}

pub fn load_sighash_fixtures() -> Vec<(String, SighashFixture)> {
    load_fixture_dir("sighash")
}
