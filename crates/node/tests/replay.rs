// Path: crates/node/tests/replay.rs

use meridian_node::{load_blocks, load_config, replay};
use meridian_test_utils::assert_ok;
use meridian_test_utils::fixtures::{
    account, block, confirm, submit, validator, Fixtures, GenesisBuilder,
};
use meridian_types::app::CallPayload;

#[test]
fn replays_files_into_summary() {
    let fixtures = Fixtures::new().unwrap();
    let cfg = GenesisBuilder::new()
        .with_validators(3)
        .with_bounds(1, 10)
        .node_config();
    let blocks = vec![
        block(
            1,
            vec![submit(
                1,
                CallPayload::AddValidator {
                    validator: validator(4),
                },
                "add-4",
            )],
        ),
        block(
            2,
            vec![
                confirm(2, 1),
                submit(1, CallPayload::CancelUpgrade, "cancel"),
            ],
        ),
    ];
    let config_path = fixtures.write_config("node.toml", &cfg).unwrap();
    let blocks_path = fixtures.write_blocks("blocks.json", &blocks).unwrap();

    let cfg = assert_ok!(load_config(&config_path));
    let blocks = assert_ok!(load_blocks(&blocks_path));
    let summary = assert_ok!(replay(&cfg, &blocks));

    assert_eq!(summary.status.height, 2);
    assert_eq!(summary.status.total_transactions, 3);
    assert_eq!(summary.validators.len(), 4);
    assert!(summary.validators.iter().any(|v| v.address == account(4)));
    assert_eq!(summary.quorum, 3);
    assert_eq!(summary.last_call_id, 2);
    assert_eq!(summary.pending_calls.len(), 1);
    assert_eq!(summary.pending_calls[0].unique_id, "cancel");

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["blocks"].as_array().map(Vec::len), Some(2));
}

#[test]
fn replay_stops_at_out_of_order_block() {
    let cfg = GenesisBuilder::new().with_validators(1).node_config();
    let err = replay(&cfg, &[block(2, vec![])]).unwrap_err();
    assert!(format!("{:#}", err).contains("applying block 2"));
}

#[test]
fn malformed_config_is_reported_with_path() {
    let fixtures = Fixtures::new().unwrap();
    let path = fixtures.write("node.toml", "chain_id = \"x\"").unwrap();
    let err = load_config(&path).unwrap_err();
    assert!(format!("{}", err).contains("parsing config"));
}
