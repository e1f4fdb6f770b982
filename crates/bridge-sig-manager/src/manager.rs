//! Define the [`SignatureManager`] that is responsible for managing signatures for
//! [`Psbt`](bitcoin::Psbt)'s.

use std::{collections::BTreeMap, sync::Arc};

use alpen_express_db::entities::bridge_tx_state::BridgeTxState;
use alpen_express_primitives::{
    bridge::{Musig2PubNonce, OperatorIdx, PublickeyTable, SignatureInfo, TxSigningData},
    l1::SpendInfo,
};
use bitcoin::{
    hashes::Hash,
    key::{
        rand::{self, RngCore},
        Keypair,
    },
    secp256k1::{schnorr::Signature, PublicKey, SecretKey},
    sighash::SighashCache,
    witness::Witness,
    Transaction, Txid,
};
use express_storage::ops::bridge::BridgeTxStateOps;
use musig2::{aggregate_partial_signatures, AggNonce, KeyAggContext, SecNonce};

use super::errors::{BridgeSigError, BridgeSigResult};
use crate::operations::{create_script_spend_hash, sign_state_partial, verify_partial_sig};

/// Handle creation, collection and aggregation of signatures for a [`BridgeTxState`] with the help
/// of a persistence layer.
#[derive(Clone)]
pub struct SignatureManager {
    /// Abstraction over the persistence layer for the signatures.
    db_ops: Arc<BridgeTxStateOps>,

    /// This bridge client's keypair
    keypair: Keypair,

    /// This bridge client's Operator index.
    index: OperatorIdx,
}

impl std::fmt::Debug for SignatureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "signature manager: {}", self.index)
    }
}

impl SignatureManager {
    /// Create a new [`SignatureManager`].
    pub fn new(db_ops: Arc<BridgeTxStateOps>, index: OperatorIdx, keypair: Keypair) -> Self {
        Self {
            db_ops,
            keypair,
            index,
        }
    }

    /// Adds a [`BridgeTxState`] to the [`SignatureManager`] replacing if already present for the
    /// computed txid.
    pub async fn add_tx_state(
        &self,
        tx_signing_data: TxSigningData,
        pubkey_table: PublickeyTable,
    ) -> BridgeSigResult<Txid> {
        let txid = tx_signing_data.unsigned_tx.compute_txid();

        // Catching this error will help avoid the tx from being replaced *after* the nonces have
        // already been shared. The flip side is that transactions cannot be replaced at all.
        if self.db_ops.get_tx_state_async(txid).await?.is_some() {
            return Err(BridgeSigError::DuplicateTransaction);
        }

        let key_agg_ctx = KeyAggContext::new(pubkey_table.0.values().copied())?;

        let sec_nonce = self.generate_sec_nonce(&txid, &key_agg_ctx);
        let pub_nonce = sec_nonce.public_nonce();

        let mut tx_state = BridgeTxState::new(tx_signing_data, pubkey_table, sec_nonce.into())?;
        tx_state.add_nonce(&self.index, pub_nonce.into())?;

        self.db_ops.upsert_tx_state_async(txid, tx_state).await?;

        Ok(txid)
    }

    /// Generate a random sec nonce.
    fn generate_sec_nonce(&self, txid: &Txid, key_agg_ctx: &KeyAggContext) -> SecNonce {
        let aggregated_pubkey: PublicKey = key_agg_ctx.aggregated_pubkey();

        let mut nonce_seed = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut nonce_seed);

        let seckey = SecretKey::from_keypair(&self.keypair);

        SecNonce::build(nonce_seed)
            .with_seckey(seckey)
            .with_message(txid.as_byte_array())
            .with_aggregated_pubkey(aggregated_pubkey)
            .build()
    }

    /// Get one's own pubnonce for the given [`Txid`].
    pub async fn get_own_nonce(&self, txid: &Txid) -> BridgeSigResult<Musig2PubNonce> {
        let tx_state = self.db_ops.get_tx_state_async(*txid).await?;

        if tx_state.is_none() {
            return Err(BridgeSigError::TransactionNotFound);
        }

        let tx_state = tx_state.unwrap();

        let pubnonce = tx_state
            .collected_nonces()
            .get(&self.index)
            .expect("should always be present whenever a state is present");

        Ok(pubnonce.clone())
    }

    /// Add a nonce to the collection for given [`OperatorIdx`] and [`Txid`]. The [`OperatorIdx`]
    /// may even be the same as [`Self::index`] in which case the nonce is updated. It is assumed
    /// that the upstream duty producer makes sure that the nonce only comes from a node authorized
    /// to produce that nonce.
    ///
    /// # Returns
    ///
    /// A flag indicating whether adding the nonce completes the collection.
    pub async fn add_nonce(
        &self,
        txid: &Txid,
        operator_index: OperatorIdx,
        pub_nonce: &Musig2PubNonce,
    ) -> BridgeSigResult<bool> {
        let tx_state = self.db_ops.get_tx_state_async(*txid).await?;
        if tx_state.is_none() {
            return Err(BridgeSigError::TransactionNotFound);
        }

        let mut tx_state = tx_state.unwrap();

        let is_complete = tx_state.add_nonce(&operator_index, pub_nonce.clone())?;
        self.db_ops.upsert_tx_state_async(*txid, tx_state).await?;

        Ok(is_complete)
    }

    /// Gets the aggregated nonce from the list of collected nonces for the transaction
    /// corresponding to the given [`Txid`].
    ///
    /// # Errors
    ///
    /// If not all nonces have been colllected yet.
    pub fn get_aggregated_nonce(&self, tx_state: &BridgeTxState) -> BridgeSigResult<AggNonce> {
        if !tx_state.has_all_nonces() {
            return Err(BridgeSigError::IncompleteNonces);
        }

        Ok(tx_state.ordered_nonces().into_iter().sum())
    }

    /// Add this bridge client's signature for the transaction.
    ///
    /// # Returns
    ///
    /// A flag indicating whether the [`alpen_express_primitives::l1::BitcoinPsbt`] being tracked in
    /// the [`BridgeTxState`] has become fully signed after adding the signature.
    pub async fn add_own_partial_sig(&self, txid: &Txid) -> BridgeSigResult<bool> {
        let tx_state = self.db_ops.get_tx_state_async(*txid).await?;

        if tx_state.is_none() {
            return Err(BridgeSigError::TransactionNotFound);
        }

        let mut tx_state = tx_state.unwrap();

        let aggregated_nonce = self.get_aggregated_nonce(&tx_state)?;

        let prevouts = tx_state.prevouts();

        let unsigned_tx = tx_state.unsigned_tx().clone();
        let inputs = unsigned_tx.input.clone();

        let mut is_fully_signed = false;
        for (input_index, _) in inputs.iter().enumerate() {
            let spend_infos = tx_state.spend_infos();
            let script = &spend_infos[input_index].script_buf;

            let mut tx = unsigned_tx.clone();
            let mut sighash_cache = SighashCache::new(&mut tx);

            let message =
                create_script_spend_hash(&mut sighash_cache, input_index, script, &prevouts[..])?;
            let message = message.as_ref();

            let signature = sign_state_partial(
                tx_state.pubkeys(),
                tx_state.secnonce(),
                &self.keypair,
                &aggregated_nonce,
                message,
            )?;

            let own_signature_info = SignatureInfo::new(signature.into(), self.index);
            verify_partial_sig(&tx_state, &own_signature_info, &aggregated_nonce, message)?;

            is_fully_signed = tx_state.add_signature(own_signature_info, input_index)?;

            // It may be that adding one's own signature causes the psbt to be completely signed.
            // This can happen if this bridge client receives the transaction information later than
            // other bridge clients.
            if is_fully_signed {
                break;
            }
        }

        self.db_ops
            .upsert_tx_state_async(*txid, tx_state.clone())
            .await?;

        Ok(is_fully_signed)
    }

    /// Add a partial signature for a [`BridgeTxState`]. The [`SignatureInfo::signer_index`]
    /// may even be the same as [`Self::index`] in which case the nonce is updated. It is assumed
    /// that the upstream duty producer makes sure that the nonce only comes from a node authorized
    /// to produce that nonce.
    ///
    /// # Returns
    ///
    /// A flag indicating whether the [`alpen_express_primitives::l1::BitcoinPsbt`] being tracked in
    /// the [`BridgeTxState`] has become fully signed after adding the signature.
    pub async fn add_partial_sig(
        &self,
        txid: &Txid,
        signature_info: SignatureInfo,
        input_index: usize,
    ) -> BridgeSigResult<bool> {
        let tx_state = self.db_ops.get_tx_state_async(*txid).await?;

        if tx_state.is_none() {
            return Err(BridgeSigError::TransactionNotFound);
        }

        let mut tx_state = tx_state.unwrap();

        if input_index.ge(&tx_state.unsigned_tx().input.len()) {
            return Err(BridgeSigError::InputIndexOutOfBounds);
        }

        let aggregated_nonce = self.get_aggregated_nonce(&tx_state)?;

        let mut unsigned_tx = tx_state.unsigned_tx().clone();
        let mut sighash_cache = SighashCache::new(&mut unsigned_tx);

        let spend_infos = tx_state.spend_infos();
        let script = &spend_infos[input_index].script_buf;
        let prevouts = tx_state.prevouts();

        let message =
            create_script_spend_hash(&mut sighash_cache, input_index, script, &prevouts[..])?;
        let message = message.as_ref();

        verify_partial_sig(&tx_state, &signature_info, &aggregated_nonce, message)?;

        tx_state.add_signature(signature_info, input_index)?;
        self.db_ops
            .upsert_tx_state_async(*txid, tx_state.clone())
            .await?;

        Ok(tx_state.is_fully_signed())
    }

    /// Retrieve the fully signed transaction for broadcasting.
    pub async fn get_fully_signed_transaction(&self, txid: &Txid) -> BridgeSigResult<Transaction> {
        let tx_state = self.db_ops.get_tx_state_async(*txid).await?;

        if tx_state.is_none() {
            return Err(BridgeSigError::TransactionNotFound);
        }

        let tx_state = tx_state.unwrap();

        // this fails if not all nonces have been collected yet.
        let aggregated_nonce = self.get_aggregated_nonce(&tx_state)?;

        if !tx_state.is_fully_signed() {
            return Err(BridgeSigError::NotFullySigned);
        }

        let spend_infos = tx_state.spend_infos();
        let prevouts = &tx_state.prevouts();

        let key_agg_ctx = KeyAggContext::new(tx_state.pubkeys().0.values().clone().copied())?;

        let mut unsigned_tx = tx_state.unsigned_tx().clone();
        let mut sighash_cache = SighashCache::new(&mut unsigned_tx);

        let mut psbt = tx_state.psbt().inner().clone();

        let partial_sigs_all_inputs = tx_state.ordered_sigs();

        for (input_index, input) in psbt.inputs.iter_mut().enumerate() {
            let SpendInfo {
                script_buf: script,
                control_block,
            } = spend_infos[input_index].clone();

            // OPTIMIZE: this message is being created every time we sign a transaction in
            // `add_own_signature` *and* here as well. This is suboptimal computationally but the
            // alternative is to store it in the database for every input on every transaction which
            // is also wasteful (also involves creating a wrapper around `Message` to
            // implement serde*, borsh* and arbitrary traits).
            let message =
                create_script_spend_hash(&mut sighash_cache, input_index, &script, prevouts)?;

            let message = message.as_ref();

            // OPTIMIZE: we know for sure that we are not gonna visit an index again. So, there may
            // be a hack to get around the borrow checker and avoid cloning here.
            let partial_signatures = partial_sigs_all_inputs[input_index].clone();

            let signature: Signature = aggregate_partial_signatures(
                &key_agg_ctx,
                &aggregated_nonce,
                partial_signatures,
                message,
            )?;

            let mut witness = Witness::new();
            witness.push(signature.as_ref());
            witness.push(script.to_bytes());
            witness.push(control_block.serialize());

            // Finalize the psbt as per <https://github.com/rust-bitcoin/rust-bitcoin/blob/bitcoin-0.32.1/bitcoin/examples/taproot-psbt.rs#L315-L327>
            // NOTE: their ecdsa example states that we should use `miniscript` to finalize
            // PSBTs in production but they don't mention this for taproot.

            // Set final witness
            input.final_script_witness = Some(witness);

            // And clear all other fields as per the spec
            input.partial_sigs = BTreeMap::new();
            input.sighash_type = None;
            input.redeem_script = None;
            input.witness_script = None;
            input.bip32_derivation = BTreeMap::new();
        }

        let signed_tx = psbt.extract_tx()?;

        Ok(signed_tx)
    }
}
