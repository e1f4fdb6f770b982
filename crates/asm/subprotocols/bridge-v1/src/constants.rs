use strata_l1_txfmt::SubprotocolId;

/// Macro to define all type IDs and ensure they're included in uniqueness tests
macro_rules! define_ids {
    ($type:ty, $const_name:ident, $($name:ident = $value:expr),* $(,)?) => {
        $(
            pub(crate) const $name: $type = $value;
        )*

        /// Array containing all defined type IDs
        #[allow(dead_code)]
        const $const_name: &'static [$type] = &[$($name),*];
    };
}

// Define all subprotocol IDs
define_ids! {SubprotocolId, SUBPROTOCOL_IDS,
    CORE_SUBPROTOCOL_ID = 1,
    BRIDGE_SUBPROTOCOL_ID = 2,
}
