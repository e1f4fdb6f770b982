use std::path::PathBuf;

use bdk_bitcoind_rpc::{
    bitcoincore_rpc::{Auth, Client},
    Emitter,
};
use bdk_wallet::{
    bitcoin::{key::Parity, Address, AddressType, PublicKey, XOnlyPublicKey},
    miniscript::ToPublicKey,
    KeychainKind, Wallet,
};
use musig2::KeyAggContext;

use crate::{
    constants::{CHANGE_DESCRIPTOR, DESCRIPTOR, NETWORK},
    error::Error,
    parse::{parse_pk, parse_xonly_pk},
};

/// Extracts the public key from a Taproot address.
pub(crate) trait ExtractP2trPubkey {
    /// Extracts the public key from a Taproot address.
    fn extract_p2tr_pubkey(&self) -> Result<XOnlyPublicKey, Error>;
}

impl ExtractP2trPubkey for Address {
    fn extract_p2tr_pubkey(&self) -> Result<XOnlyPublicKey, Error> {
        match self.address_type() {
            Some(AddressType::P2tr) => {}
            _ => return Err(Error::NotTaprootAddress),
        }

        let script_pubkey = self.script_pubkey();

        Ok(XOnlyPublicKey::from_slice(&script_pubkey.as_bytes()[2..]).expect("valid pub key"))
    }
}

/// A simple Taproot-enable wallet.
///
/// # Note
///
/// This uses the hardcoded `[DESCRIPTOR]` and `[CHANGE_DESCRIPTOR]`.
pub(crate) fn taproot_wallet() -> Result<Wallet, Error> {
    Wallet::create(*DESCRIPTOR, *CHANGE_DESCRIPTOR)
        .network(NETWORK)
        .create_wallet_no_persist()
        .map_err(|_| Error::Wallet)
}

/// Syncs a wallet with the network using `bitcoind` as the backend.
///
/// # Note
///
/// This function should be only used with Regtest.
pub(crate) fn sync_wallet(wallet: &mut Wallet, rpc_client: &Client) -> Result<(), Error> {
    let wallet_tip = wallet.latest_checkpoint();
    let mut emitter = Emitter::new(rpc_client, wallet_tip, 0);
    while let Some(block) = emitter.next_block().expect("valid block") {
        let height = block.block_height();
        let connected_to = block.connected_to();
        wallet
            .apply_block_connected_to(&block.block, height, connected_to)
            .map_err(|_| Error::BitcoinD)?
    }
    Ok(())
}

/// Creates a new `bitcoind` RPC client.
pub(crate) fn new_bitcoind_client(
    url: &str,
    rpc_cookie: Option<&PathBuf>,
    rpc_user: Option<&str>,
    rpc_pass: Option<&str>,
) -> Result<Client, Error> {
    Client::new(
        url,
        match (rpc_cookie, rpc_user, rpc_pass) {
            (None, None, None) => Auth::None,
            (Some(path), _, _) => Auth::CookieFile(path.clone()),
            (_, Some(user), Some(pass)) => Auth::UserPass(user.into(), pass.into()),
            (_, Some(_), None) => panic!("rpc auth: missing rpc_pass"),
            (_, None, Some(_)) => panic!("rpc auth: missing rpc_user"),
        },
    )
    .map_err(|_| Error::RpcClient)
}

/// Gets a (receiving/external) address from the [`taproot_wallet`] at the given `index`.
pub(crate) fn get_address_inner(index: u32) -> Result<String, Error> {
    let wallet = taproot_wallet()?;
    let address = wallet
        .peek_address(KeychainKind::External, index)
        .address
        .to_string();
    Ok(address)
}

/// MuSig2 aggregates public keys into a single public key.
///
/// # Note
///
/// These should all be X-only public keys, assuming they are even
pub(crate) fn musig_aggregate_pks_inner(pks: Vec<String>) -> Result<String, Error> {
    let pks = pks
        .into_iter()
        .map(|pk| parse_xonly_pk(&pk).map_err(|_| Error::XOnlyPublicKey))
        .collect::<Result<Vec<_>, _>>()?;

    let pks: Vec<(XOnlyPublicKey, Parity)> = pks.into_iter().map(|pk| (pk, Parity::Even)).collect();
    let key_agg_ctx = KeyAggContext::new(pks).map_err(|_| Error::XOnlyPublicKey)?;
    let result = key_agg_ctx.aggregated_pubkey::<XOnlyPublicKey>();

    Ok(result.to_string())
}

/// Converts a [`PublicKey`] string to an [`XOnlyPublicKey`] string.
///
/// # Note
///
/// This only works for even keys (i.e. starts with `"02"`) and will return an error otherwise.
pub(crate) fn convert_to_xonly_pk_inner(pk: String) -> Result<String, Error> {
    let pk = parse_pk(&pk)?;
    let x_only_pk = convert_to_xonly_pk_core(pk)?;
    Ok(x_only_pk.to_string())
}

/// Converts a [`PublicKey`] to an [`XOnlyPublicKey`] (core implementation).
///
/// # Note
///
/// This only works for even keys (i.e. starts with `"02"`) and will return an error otherwise.
fn convert_to_xonly_pk_core(pk: PublicKey) -> Result<XOnlyPublicKey, Error> {
    // assert that the first byte is 0x02 as string.
    if !pk.to_string().starts_with("02") {
        return Err(Error::PublicKey);
    }
    let x_only_pk = pk.to_x_only_pubkey();
    Ok(x_only_pk)
}

/// Extract the [`XOnlyPublicKey`] from a Taproot `address`.
///
/// # Note
///
/// This assumes that the caller has verified the `address`.
pub(crate) fn extract_p2tr_pubkey_inner(address: String) -> Result<String, Error> {
    let address = &address
        .parse::<Address<_>>()
        .map_err(|_| Error::NotTaprootAddress)?
        .assume_checked();
    let pk = address.extract_p2tr_pubkey()?;
    Ok(pk.to_string())
}
