use crate::dash::DashTxType;
use crate::error::WasmUtxoTxError;
use crate::networks::Network;
use crate::transaction::{satoshis_from_f64, u32_from_f64, Transaction};
use wasm_bindgen::prelude::*;

fn parse_network(network_name: &str) -> Result<Network, WasmUtxoTxError> {
    Network::from_name(network_name)
        .ok_or_else(|| WasmUtxoTxError::new(&format!("Unknown network: {}", network_name)))
}

/// A transaction of any supported coin family
///
/// The network (coin name such as `btc`/`zec`, or utxo-lib name such as `bitcoin`/`zcash`)
/// selects the wire format.
#[wasm_bindgen]
#[derive(Clone)]
pub struct WasmTransaction {
    tx: Transaction,
    network: Network,
}

#[wasm_bindgen]
impl WasmTransaction {
    /// Create an empty transaction with the network's default version
    #[wasm_bindgen(constructor)]
    pub fn new(network: &str) -> Result<WasmTransaction, WasmUtxoTxError> {
        let network = parse_network(network)?;
        Ok(WasmTransaction {
            tx: Transaction::new(network.family()),
            network,
        })
    }

    /// Deserialize a transaction from bytes
    ///
    /// # Errors
    /// Returns an error if the bytes are truncated, malformed, or followed by trailing data
    #[wasm_bindgen(js_name = fromBytes)]
    pub fn from_bytes(bytes: &[u8], network: &str) -> Result<WasmTransaction, WasmUtxoTxError> {
        let network = parse_network(network)?;
        let tx = Transaction::from_bytes(bytes, network.family())?;
        Ok(WasmTransaction { tx, network })
    }

    /// Deserialize without rejecting trailing data or an all-empty witness section
    #[wasm_bindgen(js_name = fromBytesLenient)]
    pub fn from_bytes_lenient(
        bytes: &[u8],
        network: &str,
    ) -> Result<WasmTransaction, WasmUtxoTxError> {
        let network = parse_network(network)?;
        let tx = Transaction::from_bytes_lenient(bytes, network.family())?;
        Ok(WasmTransaction { tx, network })
    }

    #[wasm_bindgen(js_name = fromHex)]
    pub fn from_hex(hex: &str, network: &str) -> Result<WasmTransaction, WasmUtxoTxError> {
        let network = parse_network(network)?;
        let tx = Transaction::from_hex(hex, network.family())?;
        Ok(WasmTransaction { tx, network })
    }

    #[allow(clippy::should_implement_trait)]
    pub fn clone(&self) -> WasmTransaction {
        Clone::clone(self)
    }

    #[wasm_bindgen(js_name = toBytes)]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.tx.to_bytes()
    }

    #[wasm_bindgen(js_name = toBytesNoWitness)]
    pub fn to_bytes_no_witness(&self) -> Vec<u8> {
        self.tx.to_bytes_no_witness()
    }

    #[wasm_bindgen(js_name = toHex)]
    pub fn to_hex(&self) -> String {
        self.tx.to_hex()
    }

    /// Transaction id (reversed double SHA-256 of the serialization without witness)
    #[wasm_bindgen(js_name = getId)]
    pub fn get_id(&self) -> String {
        self.tx.get_id()
    }

    /// Transaction hash in internal byte order
    #[wasm_bindgen(js_name = getHash)]
    pub fn get_hash(&self) -> Vec<u8> {
        self.tx.get_hash().to_vec()
    }

    #[wasm_bindgen(getter)]
    pub fn network(&self) -> String {
        self.network.to_coin_name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn version(&self) -> i32 {
        self.tx.version
    }

    #[wasm_bindgen(setter)]
    pub fn set_version(&mut self, version: i32) {
        self.tx.version = version;
    }

    #[wasm_bindgen(getter)]
    pub fn locktime(&self) -> u32 {
        self.tx.locktime
    }

    #[wasm_bindgen(setter)]
    pub fn set_locktime(&mut self, locktime: u32) {
        self.tx.locktime = locktime;
    }

    /// Capricoin transaction timestamp
    #[wasm_bindgen(getter)]
    pub fn timestamp(&self) -> u32 {
        self.tx.timestamp
    }

    #[wasm_bindgen(setter)]
    pub fn set_timestamp(&mut self, timestamp: u32) {
        self.tx.timestamp = timestamp;
    }

    #[wasm_bindgen(getter = versionGroupId)]
    pub fn version_group_id(&self) -> u32 {
        self.tx.version_group_id
    }

    #[wasm_bindgen(setter = versionGroupId)]
    pub fn set_version_group_id(&mut self, version_group_id: u32) {
        self.tx.version_group_id = version_group_id;
    }

    /// Zcash expiry height
    #[wasm_bindgen(getter)]
    pub fn expiry(&self) -> u32 {
        self.tx.expiry
    }

    #[wasm_bindgen(setter)]
    pub fn set_expiry(&mut self, expiry: u32) {
        self.tx.expiry = expiry;
    }

    #[wasm_bindgen(js_name = inputCount)]
    pub fn input_count(&self) -> usize {
        self.tx.inputs.len()
    }

    #[wasm_bindgen(js_name = outputCount)]
    pub fn output_count(&self) -> usize {
        self.tx.outputs.len()
    }

    #[wasm_bindgen(js_name = byteLength)]
    pub fn byte_length(&self) -> usize {
        self.tx.byte_length()
    }

    #[wasm_bindgen(js_name = virtualSize)]
    pub fn virtual_size(&self) -> usize {
        self.tx.virtual_size()
    }

    pub fn weight(&self) -> usize {
        self.tx.weight()
    }

    #[wasm_bindgen(js_name = hasWitnesses)]
    pub fn has_witnesses(&self) -> bool {
        self.tx.has_witnesses()
    }

    #[wasm_bindgen(js_name = isCoinbase)]
    pub fn is_coinbase(&self) -> bool {
        self.tx.is_coinbase()
    }

    /// Add an input
    ///
    /// # Arguments
    /// * `hash` - Previous transaction hash (32 bytes, internal byte order)
    /// * `index` - Output index being spent; must fit in a u32
    /// * `sequence` - Sequence number (default: 0xffffffff); must fit in a u32
    /// * `script` - Input script (default: empty)
    ///
    /// # Returns
    /// The index of the newly added input
    #[wasm_bindgen(js_name = addInput)]
    pub fn add_input(
        &mut self,
        hash: &[u8],
        index: f64,
        sequence: Option<f64>,
        script: Option<Vec<u8>>,
    ) -> Result<usize, WasmUtxoTxError> {
        let index = u32_from_f64("index", index)?;
        let sequence = sequence
            .map(|sequence| u32_from_f64("sequence", sequence))
            .transpose()?;
        Ok(self.tx.add_input(hash, index, sequence, script)?)
    }

    /// Add an output
    ///
    /// # Arguments
    /// * `script` - The output script
    /// * `value` - Value in satoshis; must be a non-negative safe integer
    ///
    /// # Returns
    /// The index of the newly added output
    #[wasm_bindgen(js_name = addOutput)]
    pub fn add_output(&mut self, script: &[u8], value: f64) -> Result<usize, WasmUtxoTxError> {
        let value = satoshis_from_f64(value)?;
        Ok(self.tx.add_output(script.to_vec(), value))
    }

    #[wasm_bindgen(js_name = setInputScript)]
    pub fn set_input_script(
        &mut self,
        index: usize,
        script: &[u8],
    ) -> Result<(), WasmUtxoTxError> {
        Ok(self.tx.set_input_script(index, script.to_vec())?)
    }

    #[wasm_bindgen(js_name = setWitness)]
    pub fn set_witness(
        &mut self,
        index: usize,
        witness: Vec<js_sys::Uint8Array>,
    ) -> Result<(), WasmUtxoTxError> {
        let witness = witness.iter().map(|item| item.to_vec()).collect();
        Ok(self.tx.set_witness(index, witness)?)
    }

    #[wasm_bindgen(js_name = getWitness)]
    pub fn get_witness(&self, index: usize) -> Result<Vec<js_sys::Uint8Array>, WasmUtxoTxError> {
        let input = self.tx.inputs.get(index).ok_or_else(|| {
            WasmUtxoTxError::new(&format!("Input index {} out of range", index))
        })?;
        Ok(input
            .witness
            .iter()
            .map(|item| js_sys::Uint8Array::from(&item[..]))
            .collect())
    }

    /// Legacy signature hash
    ///
    /// Returns `0x01` followed by 31 zero bytes for an out-of-range input or a SIGHASH_SINGLE
    /// input without a matching output.
    #[wasm_bindgen(js_name = hashForSignature)]
    pub fn hash_for_signature(
        &self,
        in_index: usize,
        prev_out_script: &[u8],
        hash_type: u32,
    ) -> Result<Vec<u8>, WasmUtxoTxError> {
        let hash = self
            .tx
            .hash_for_signature(in_index, prev_out_script, hash_type)?;
        Ok(hash.to_vec())
    }

    /// BIP143 signature hash (not available for Zcash-like networks)
    #[wasm_bindgen(js_name = hashForWitnessV0)]
    pub fn hash_for_witness_v0(
        &self,
        in_index: usize,
        prev_out_script: &[u8],
        value: f64,
        hash_type: u32,
    ) -> Result<Vec<u8>, WasmUtxoTxError> {
        let value = satoshis_from_f64(value)?;
        let hash = self
            .tx
            .hash_for_witness_v0(in_index, prev_out_script, value, hash_type)?;
        Ok(hash.to_vec())
    }

    /// ZIP143 signature hash (Zcash-like networks, version 3 and above)
    #[wasm_bindgen(js_name = hashForZip143)]
    pub fn hash_for_zip143(
        &self,
        in_index: usize,
        prev_out_script: &[u8],
        value: f64,
        hash_type: u32,
    ) -> Result<Vec<u8>, WasmUtxoTxError> {
        let value = satoshis_from_f64(value)?;
        let hash = self
            .tx
            .hash_for_zip143(in_index, prev_out_script, value, hash_type)?;
        Ok(hash.to_vec())
    }

    /// ZIP143 on Zcash-like networks, BIP143 elsewhere
    #[wasm_bindgen(js_name = hashForWitness)]
    pub fn hash_for_witness(
        &self,
        in_index: usize,
        prev_out_script: &[u8],
        value: f64,
        hash_type: u32,
    ) -> Result<Vec<u8>, WasmUtxoTxError> {
        let value = satoshis_from_f64(value)?;
        let hash = self
            .tx
            .hash_for_witness(in_index, prev_out_script, value, hash_type)?;
        Ok(hash.to_vec())
    }

    /// JoinSplit section of a Zcash transaction or payload of a Dash special transaction
    #[wasm_bindgen(js_name = getExtraData)]
    pub fn get_extra_data(&self) -> Option<Vec<u8>> {
        self.tx.extra_data()
    }

    #[wasm_bindgen(js_name = getDashPayload)]
    pub fn get_dash_payload(&self) -> Option<Vec<u8>> {
        self.tx.dash_payload().map(<[u8]>::to_vec)
    }

    /// Make this a Dash special transaction (version 3) of the given type
    #[wasm_bindgen(js_name = setDashPayload)]
    pub fn set_dash_payload(
        &mut self,
        tx_type: u16,
        payload: &[u8],
    ) -> Result<(), WasmUtxoTxError> {
        let tx_type = DashTxType::try_from(tx_type).map_err(|t| {
            WasmUtxoTxError::new(&format!("Unsupported Dash transaction type: {}", t))
        })?;
        Ok(self.tx.set_dash_payload(tx_type, payload.to_vec())?)
    }

    #[wasm_bindgen(getter = dashType)]
    pub fn dash_type(&self) -> u16 {
        self.tx.dash_type
    }
}
