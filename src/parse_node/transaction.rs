use super::node::{Node, Primitive};
use crate::networks::Network;
use crate::script::to_asm;
use crate::transaction::{OutputValue, Transaction, TxInput, TxOutput};
use crate::zcash::{JoinSplit, JoinSplitProof};

fn script_to_node(label: &str, script: &[u8]) -> Node {
    let mut node = Node::new(label, Primitive::buffer(script));
    if !script.is_empty() {
        node.add_child(Node::new("asm", Primitive::String(to_asm(script))));
    }
    node
}

fn input_to_node(input: &TxInput, index: usize) -> Node {
    let mut hash = input.hash;
    hash.reverse();

    let mut node = Node::new(format!("input_{}", index), Primitive::None);
    node.add_child(Node::new("prev_txid", Primitive::buffer(hash)));
    node.add_child(Node::new("prev_vout", Primitive::U32(input.index)));
    node.add_child(Node::new("sequence", Primitive::U32(input.sequence)));
    node.add_child(script_to_node("script_sig", &input.script));

    if !input.witness.is_empty() {
        let mut witness_node = Node::new("witness", Primitive::U64(input.witness.len() as u64));
        for (i, item) in input.witness.iter().enumerate() {
            witness_node.add_child(Node::new(format!("item_{}", i), Primitive::buffer(&item[..])));
        }
        node.add_child(witness_node);
    }
    node
}

fn output_to_node(output: &TxOutput, index: usize) -> Node {
    let mut node = Node::new(format!("output_{}", index), Primitive::None);
    let value = match output.value {
        OutputValue::Amount(v) => Primitive::U64(v),
        OutputValue::Raw(raw) => Primitive::buffer(raw),
    };
    node.add_child(Node::new("value", value));
    node.add_child(script_to_node("script_pubkey", &output.script));
    node
}

fn joinsplit_to_node(joinsplit: &JoinSplit, index: usize) -> Node {
    let mut node = Node::new(format!("joinsplit_{}", index), Primitive::None);
    node.add_child(Node::new("vpub_old", Primitive::U64(joinsplit.vpub_old)));
    node.add_child(Node::new("vpub_new", Primitive::U64(joinsplit.vpub_new)));
    node.add_child(Node::new("anchor", Primitive::buffer(joinsplit.anchor)));
    for (i, nullifier) in joinsplit.nullifiers.iter().enumerate() {
        node.add_child(Node::new(format!("nullifier_{}", i), Primitive::buffer(*nullifier)));
    }
    for (i, commitment) in joinsplit.commitments.iter().enumerate() {
        node.add_child(Node::new(format!("commitment_{}", i), Primitive::buffer(*commitment)));
    }
    let proof = match joinsplit.proof {
        JoinSplitProof::Phgr13(_) => "phgr13",
        JoinSplitProof::Groth16 { .. } => "groth16",
    };
    node.add_child(Node::new("proof", Primitive::String(proof.to_string())));
    node
}

fn zcash_fields_to_node(tx: &Transaction, tx_node: &mut Node) {
    if tx.is_overwinter_compatible() {
        tx_node.add_child(Node::new("is_overwintered", Primitive::Boolean(true)));
        tx_node.add_child(Node::new(
            "version_group_id",
            Primitive::U32(tx.version_group_id),
        ));
        tx_node.add_child(Node::new("expiry_height", Primitive::U32(tx.expiry)));
    }

    if tx.is_sapling_compatible() {
        tx_node.add_child(Node::new("value_balance", Primitive::I64(tx.value_balance)));
        tx_node.add_child(Node::new(
            "spend_descriptions",
            Primitive::U64(tx.spend_descriptions.len() as u64),
        ));
        tx_node.add_child(Node::new(
            "output_descriptions",
            Primitive::U64(tx.output_descriptions.len() as u64),
        ));
    }

    if tx.supports_joinsplits() {
        let mut joinsplits = Node::new("joinsplits", Primitive::U64(tx.joinsplits.len() as u64));
        for (i, joinsplit) in tx.joinsplits.iter().enumerate() {
            joinsplits.add_child(joinsplit_to_node(joinsplit, i));
        }
        if !tx.joinsplits.is_empty() {
            joinsplits.add_child(Node::new(
                "joinsplit_pubkey",
                Primitive::buffer(tx.joinsplit_pubkey),
            ));
        }
        tx_node.add_child(joinsplits);
    }
}

/// Convert a decoded transaction into a display tree
pub fn tx_to_node(tx: &Transaction, network: Network) -> Node {
    let mut tx_node = Node::new("tx", Primitive::None);

    tx_node.add_child(Node::new("network", Primitive::String(network.to_string())));
    tx_node.add_child(Node::new("version", Primitive::I32(tx.version)));
    tx_node.add_child(Node::new("lock_time", Primitive::U32(tx.locktime)));

    if tx.family().capabilities().timestamp {
        tx_node.add_child(Node::new("timestamp", Primitive::U32(tx.timestamp)));
    }

    if tx.is_zcash_transaction() {
        zcash_fields_to_node(tx, &mut tx_node);
    }

    if let Some(payload) = tx.dash_payload() {
        let dash_type = crate::dash::DashTxType::try_from(tx.dash_type)
            .map(|t| t.name().to_string())
            .unwrap_or_else(|t| t.to_string());
        tx_node.add_child(Node::new("dash_type", Primitive::String(dash_type)));
        tx_node.add_child(Node::new("extra_payload", Primitive::buffer(payload)));
    }

    let txid = hex::decode(tx.get_id()).unwrap_or_default();
    tx_node.add_child(Node::new("txid", Primitive::buffer(txid)));
    tx_node.add_child(Node::new("size", Primitive::U64(tx.byte_length() as u64)));
    tx_node.add_child(Node::new("vsize", Primitive::U64(tx.virtual_size() as u64)));
    tx_node.add_child(Node::new("weight", Primitive::U64(tx.weight() as u64)));

    let mut inputs = Node::new("inputs", Primitive::U64(tx.inputs.len() as u64));
    for (i, input) in tx.inputs.iter().enumerate() {
        inputs.add_child(input_to_node(input, i));
    }
    tx_node.add_child(inputs);

    let mut outputs = Node::new("outputs", Primitive::U64(tx.outputs.len() as u64));
    for (i, output) in tx.outputs.iter().enumerate() {
        outputs.add_child(output_to_node(output, i));
    }
    tx_node.add_child(outputs);

    tx_node
}

pub fn parse_tx_bytes_with_network(bytes: &[u8], network: Network) -> Result<Node, String> {
    Transaction::from_bytes(bytes, network.family())
        .map(|tx| tx_to_node(&tx, network))
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::load_transaction_fixture;

    fn parse_fixture(name: &str) -> Node {
        let fixture = load_transaction_fixture(name);
        let network = Network::from_coin_name(&fixture.network).unwrap();
        let bytes = hex::decode(&fixture.hex).unwrap();
        parse_tx_bytes_with_network(&bytes, network).unwrap()
    }

    #[test]
    fn test_parse_segwit() {
        let fixture = load_transaction_fixture("btc_segwit");
        let node = parse_fixture("btc_segwit");
        assert_eq!(
            node.child("txid").map(|n| n.value.to_string()),
            Some(fixture.id)
        );
        let inputs = node.child("inputs").unwrap();
        assert_eq!(inputs.value, Primitive::U64(fixture.input_count as u64));
        assert!(inputs
            .children
            .iter()
            .any(|input| input.child("witness").is_some()));
        assert_eq!(
            node.child("vsize").map(|n| n.value.clone()),
            Some(Primitive::U64(fixture.virtual_size as u64))
        );
    }

    #[test]
    fn test_parse_zcash_sapling() {
        let node = parse_fixture("zec_v4_sapling_joinsplits");
        assert_eq!(
            node.child("version_group_id").map(|n| n.value.clone()),
            Some(Primitive::U32(0x892F2085))
        );
        let joinsplits = node.child("joinsplits").unwrap();
        assert_eq!(joinsplits.value, Primitive::U64(2));
        assert_eq!(
            joinsplits.children[0].child("proof").map(|n| n.value.to_string()),
            Some("groth16".to_string())
        );
    }

    #[test]
    fn test_parse_dash_and_timestamp() {
        let node = parse_fixture("dash_v3_type5");
        assert_eq!(
            node.child("dash_type").map(|n| n.value.to_string()),
            Some("coinbase".to_string())
        );
        let node = parse_fixture("cpc_timestamp");
        assert!(node.child("timestamp").is_some());
    }

    #[test]
    fn test_parse_error() {
        assert!(parse_tx_bytes_with_network(&[0x01], Network::Bitcoin).is_err());
    }
}
