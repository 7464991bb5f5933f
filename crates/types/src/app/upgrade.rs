// Path: crates/types/src/app/upgrade.rs
//! Protocol upgrade plans.

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A named protocol upgrade that activates at a fixed block height.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct UpgradePlan {
    /// A unique name. A name can only be applied once.
    pub name: String,
    /// The block height at which the upgrade activates.
    pub height: u64,
    /// Free-form information for node operators (e.g. a binary manifest URL).
    pub info: String,
}
