//! # Scenario Replay
//!
//! JSON scenarios read from disk and replayed by `ScenarioRunner`, the same
//! path the `ledger-runtime` binary takes.

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use et_01_token_codec::{encode, TokenKind};
    use ledger_runtime::{LedgerConfig, RuntimeError, Scenario, ScenarioRunner};
    use shared_types::{whole_units, Address, LedgerError};
    use std::io::Write;

    fn hex(address: Address) -> String {
        address.to_hex()
    }

    fn caller(n: u8) -> String {
        format!(
            r#"{{ "signer": "{}", "via_identity": "{}" }}"#,
            hex(key(n)),
            hex(idc(n))
        )
    }

    fn descriptor(kind: &str) -> String {
        format!(
            r#"{{ "kind": "{kind}", "period": {PERIOD}, "account": "{}" }}"#,
            hex(idc(PLANT))
        )
    }

    /// Plant sells 17 absolute forwards, 30 units are generated, the
    /// buyer's position is settled. `sold` overrides the 17.
    fn settlement_scenario(sold: &str) -> String {
        let mut steps = Vec::new();
        for n in [PLANT, BUYER, DISTRIBUTOR, METER] {
            steps.push(format!(
                r#"{{ "op": "register_identity", "identity": "{}", "owner": "{}" }}"#,
                hex(idc(n)),
                hex(key(n))
            ));
        }
        for n in [BUYER, DISTRIBUTOR] {
            steps.push(format!(
                r#"{{ "op": "add_claims", "subject": "{}", "topics": [10040, 10050, 10060, 10120], "expiry": {EXPIRY} }}"#,
                hex(idc(n))
            ));
        }
        steps.push(format!(
            r#"{{ "op": "add_claims", "subject": "{}", "topics": [10020], "expiry": {EXPIRY} }}"#,
            hex(idc(METER))
        ));
        steps.push(format!(
            r#"{{ "op": "create_forward_series", "caller": {}, "period": {PERIOD}, "kind": "AbsoluteForward", "reference_account": "{}", "distributor": "{}" }}"#,
            caller(PLANT),
            hex(idc(PLANT)),
            hex(idc(DISTRIBUTOR))
        ));
        steps.push(format!(
            r#"{{ "op": "mint", "caller": {}, "token": {}, "recipients": ["{}"], "quantities": ["100000000000000000000"] }}"#,
            caller(METER),
            descriptor("Certificate"),
            hex(idc(DISTRIBUTOR))
        ));
        steps.push(format!(
            r#"{{ "op": "mint", "caller": {}, "token": {}, "recipients": ["{}"], "quantities": ["{sold}"] }}"#,
            caller(PLANT),
            descriptor("AbsoluteForward"),
            hex(idc(BUYER))
        ));
        steps.push(format!(
            r#"{{ "op": "record_generation", "caller": {}, "account": "{}", "value": "0x1a055690d9db80000", "period": {PERIOD} }}"#,
            caller(METER),
            hex(idc(PLANT))
        ));
        steps.push(format!(
            r#"{{ "op": "distribute", "recipient": "{}", "forward": {} }}"#,
            hex(idc(BUYER)),
            descriptor("AbsoluteForward")
        ));

        format!(
            r#"{{ "start_time": {NOW}, "steps": [{}] }}"#,
            steps.join(",\n")
        )
    }

    fn load(json: &str) -> Scenario {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        let input = std::fs::read_to_string(file.path()).unwrap();
        Scenario::from_json(&input).unwrap()
    }

    #[test]
    fn test_scenario_file_settles_forward() {
        let scenario = load(&settlement_scenario("17000000000000000000"));
        assert_eq!(scenario.steps.len(), 12);

        let report = ScenarioRunner::run(&scenario, LedgerConfig::default()).unwrap();
        assert_eq!(report.steps, 12);

        let certificate = encode(TokenKind::Certificate, PERIOD, &idc(PLANT));
        let held = |n: u8| {
            report
                .snapshot
                .balances
                .iter()
                .find(|entry| entry.account == idc(n) && entry.token_id == certificate)
                .map(|entry| entry.quantity)
        };
        assert_eq!(held(BUYER), Some(whole_units(17)));
        assert_eq!(held(DISTRIBUTOR), Some(whole_units(83)));

        // series, certificate mint, forward mint, documentation, payout, distributed
        assert_eq!(report.events.len(), 6);
        assert_eq!(report.snapshot.event_count, 6);
        assert_eq!(report.snapshot.series.len(), 1);
        assert_eq!(report.snapshot.series[0].kind, TokenKind::AbsoluteForward);
        assert_eq!(report.snapshot.settlements.len(), 1);
        assert_eq!(report.snapshot.settlements[0].settled, whole_units(17));
    }

    #[test]
    fn test_replay_is_deterministic() {
        let scenario = load(&settlement_scenario("17000000000000000000"));
        let first = ScenarioRunner::run(&scenario, LedgerConfig::default()).unwrap();
        let second = ScenarioRunner::run(&scenario, LedgerConfig::default()).unwrap();
        assert_eq!(first.state_digest, second.state_digest);
        assert_eq!(first, second);

        let other = load(&settlement_scenario("18000000000000000000"));
        let third = ScenarioRunner::run(&other, LedgerConfig::default()).unwrap();
        assert_ne!(first.state_digest, third.state_digest);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let scenario = load(&settlement_scenario("17000000000000000000"));
        let report = ScenarioRunner::run(&scenario, LedgerConfig::default()).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["steps"].as_u64(), Some(12));
        assert!(json["state_digest"].as_str().unwrap().starts_with("0x"));
        assert_eq!(json["events"][0]["event"]["type"], "forward_series_created");
        assert_eq!(json["events"][5]["event"]["type"], "distributed");
    }

    #[test]
    fn test_failing_step_is_reported() {
        // Oversold series: 150 forwards against 30 generated pay out 30
        let scenario = load(&settlement_scenario("150000000000000000000"));
        let report = ScenarioRunner::run(&scenario, LedgerConfig::default()).unwrap();
        assert_eq!(report.snapshot.settlements[0].settled, whole_units(30));

        let mut broken = scenario.clone();
        broken.steps.insert(8, broken.steps[7].clone());
        match ScenarioRunner::run(&broken, LedgerConfig::default()) {
            Err(RuntimeError::ScenarioStep { step, op, source }) => {
                assert_eq!(step, 9);
                assert_eq!(op, "create_forward_series");
                assert!(matches!(source, LedgerError::SeriesAlreadyExists(_)));
            }
            other => panic!("expected a failing step, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_scenario_is_rejected() {
        let result = Scenario::from_json(r#"{ "steps": [{ "op": "mint" }] }"#);
        assert!(matches!(result, Err(RuntimeError::InvalidScenario(_))));
    }
}
