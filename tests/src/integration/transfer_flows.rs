//! # Transfer Flows
//!
//! Reception approvals, batch transfers and atomicity as seen through the
//! `EnergyLedger` facade.

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use et_01_token_codec::TokenKind;
    use ledger_runtime::{LedgerConfig, LedgerEvent};
    use shared_types::{unit, whole_units, ClaimTopic, LedgerError, U256};

    // =========================================================================
    // RECEPTION APPROVALS
    // =========================================================================

    #[test]
    fn test_reception_approval_is_consumed_by_transfers() {
        let market = Market::new();
        let id = market.open_series(TokenKind::GenerationBasedForward, PERIOD);
        market.approve(SECOND_BUYER, PLANT, id, 17);
        market
            .ledger
            .transfer(&ctx(PLANT), idc(PLANT), idc(SECOND_BUYER), id, whole_units(17))
            .unwrap();

        market.approve(BUYER, SECOND_BUYER, id, 12);
        let send = |quantity: U256| {
            market
                .ledger
                .transfer(&ctx(SECOND_BUYER), idc(SECOND_BUYER), idc(BUYER), id, quantity)
        };

        send(whole_units(5)).unwrap();
        send(whole_units(5)).unwrap();
        assert!(matches!(
            send(whole_units(5)),
            Err(LedgerError::ApprovalExceeded { .. })
        ));
        assert_eq!(market.balance(BUYER, &id), whole_units(10));
        assert_eq!(market.balance(SECOND_BUYER, &id), whole_units(7));

        // One base unit over what is left
        assert!(send(whole_units(2) + U256::one()).is_err());
        send(whole_units(2)).unwrap();
        assert_eq!(market.balance(BUYER, &id), whole_units(12));
        assert_eq!(market.balance(SECOND_BUYER, &id), whole_units(5));
        assert_eq!(
            market
                .ledger
                .reception_approval(&idc(BUYER), &idc(SECOND_BUYER), &id)
                .map(|approval| approval.remaining),
            Some(U256::zero())
        );
    }

    #[test]
    fn test_self_transfer_needs_self_approval() {
        let market = Market::new();
        let id = market.open_series(TokenKind::AbsoluteForward, PERIOD);
        market.sell(id, BUYER, 5);

        let result = market
            .ledger
            .transfer(&ctx(BUYER), idc(BUYER), idc(BUYER), id, whole_units(5));
        assert_eq!(
            result,
            Err(LedgerError::ApprovalExceeded {
                requested: whole_units(5),
                approved: U256::zero()
            })
        );

        market.approve(BUYER, BUYER, id, 5);
        market
            .ledger
            .transfer(&ctx(BUYER), idc(BUYER), idc(BUYER), id, whole_units(5))
            .unwrap();
        assert_eq!(market.balance(BUYER, &id), whole_units(5));
    }

    #[test]
    fn test_approval_does_not_make_recipient_eligible() {
        let market = Market::new();
        let id = market.open_series(TokenKind::AbsoluteForward, PERIOD);
        market.sell(id, SECOND_BUYER, 5);
        market.approve(OUTSIDER, SECOND_BUYER, id, 1);

        let result = market.ledger.transfer(
            &ctx(SECOND_BUYER),
            idc(SECOND_BUYER),
            idc(OUTSIDER),
            id,
            whole_units(1),
        );
        assert_eq!(
            result,
            Err(LedgerError::RecipientNotEligible {
                account: idc(OUTSIDER),
                topic: ClaimTopic::BALANCE
            })
        );
        assert_eq!(market.balance(SECOND_BUYER, &id), whole_units(5));
    }

    #[test]
    fn test_expired_claim_blocks_reception() {
        let market = Market::new();
        let id = market.open_series(TokenKind::AbsoluteForward, PERIOD);
        market.sell(id, SECOND_BUYER, 5);
        market.approve(BUYER, SECOND_BUYER, id, 5);

        market.claims.add_claim(idc(BUYER), ClaimTopic::EXISTENCE, NOW + 10);
        market.clock.advance(10);

        assert!(matches!(
            market.ledger.transfer(
                &ctx(SECOND_BUYER),
                idc(SECOND_BUYER),
                idc(BUYER),
                id,
                whole_units(1)
            ),
            Err(LedgerError::RecipientNotEligible {
                topic: ClaimTopic::EXISTENCE,
                ..
            })
        ));
    }

    #[test]
    fn test_only_the_owner_may_send() {
        let market = Market::new();
        let id = market.open_series(TokenKind::AbsoluteForward, PERIOD);
        market.sell(id, SECOND_BUYER, 5);
        market.approve(BUYER, SECOND_BUYER, id, 5);

        // Buyer's key tries to move the second buyer's forwards
        assert!(matches!(
            market.ledger.transfer(
                &ctx(BUYER),
                idc(SECOND_BUYER),
                idc(BUYER),
                id,
                whole_units(1)
            ),
            Err(LedgerError::Unauthorized(_))
        ));
    }

    // =========================================================================
    // BATCH TRANSFERS
    // =========================================================================

    #[test]
    fn test_mixed_batch_without_certificate_approval() {
        let mut config = LedgerConfig::default();
        config.transfers.certificates_require_approval = false;
        let market = Market::with_config(config);

        let period = PERIOD + 900;
        let forward = market.open_series(TokenKind::AbsoluteForward, period);
        let certificate = market.certificate_at(period);
        market.sell(forward, SECOND_BUYER, 17);
        market.issue_certificates(period, SECOND_BUYER, 17);

        // Forwards always need an approval; certificates don't under this policy
        market.approve(BUYER, SECOND_BUYER, forward, 1);
        market
            .ledger
            .batch_transfer(
                &ctx(SECOND_BUYER),
                idc(SECOND_BUYER),
                idc(BUYER),
                &[forward, certificate],
                &[whole_units(1), whole_units(3)],
            )
            .unwrap();

        let balances = market
            .ledger
            .balance_of_batch(
                &[idc(BUYER), idc(BUYER), idc(SECOND_BUYER), idc(SECOND_BUYER)],
                &[forward, certificate, forward, certificate],
            )
            .unwrap();
        assert_eq!(
            balances,
            vec![
                whole_units(1),
                whole_units(3),
                whole_units(16),
                whole_units(14)
            ]
        );

        let events = market.ledger.events();
        assert!(matches!(
            &events.last().unwrap().event,
            LedgerEvent::TransferBatch { token_ids, .. } if token_ids.len() == 2
        ));
    }

    #[test]
    fn test_failed_batch_changes_nothing() {
        let market = Market::new();
        let forward = market.open_series(TokenKind::AbsoluteForward, PERIOD);
        market.sell(forward, SECOND_BUYER, 17);
        market.issue_certificates(PERIOD, SECOND_BUYER, 17);
        market.approve(BUYER, SECOND_BUYER, forward, 1);
        let before = market.ledger.snapshot();
        let digest = market.ledger.state_digest().unwrap();

        // Certificates need an approval under the default policy
        let result = market.ledger.batch_transfer(
            &ctx(SECOND_BUYER),
            idc(SECOND_BUYER),
            idc(BUYER),
            &[forward, market.certificate()],
            &[whole_units(1), whole_units(3)],
        );
        assert!(matches!(result, Err(LedgerError::ApprovalExceeded { .. })));

        assert_eq!(market.ledger.snapshot(), before);
        assert_eq!(market.ledger.state_digest().unwrap(), digest);
        assert_eq!(
            market
                .ledger
                .reception_approval(&idc(BUYER), &idc(SECOND_BUYER), &forward)
                .map(|approval| approval.remaining),
            Some(whole_units(1))
        );
        assert_eq!(market.ledger.stats().rejected, 1);
    }

    #[test]
    fn test_batch_of_mismatched_lengths() {
        let market = Market::new();
        let forward = market.open_series(TokenKind::AbsoluteForward, PERIOD);

        assert_eq!(
            market.ledger.batch_transfer(
                &ctx(SECOND_BUYER),
                idc(SECOND_BUYER),
                idc(BUYER),
                &[forward, forward],
                &[unit()],
            ),
            Err(LedgerError::LengthMismatch { left: 2, right: 1 })
        );
    }

    // =========================================================================
    // CONCURRENCY
    // =========================================================================

    #[test]
    fn test_concurrent_transfers_conserve_supply() {
        let market = Market::new();
        let id = market.open_series(TokenKind::AbsoluteForward, PERIOD);
        market.sell(id, BUYER, 50);
        market.sell(id, SECOND_BUYER, 50);
        market.approve(BUYER, SECOND_BUYER, id, 100);
        market.approve(SECOND_BUYER, BUYER, id, 100);
        let events_before = market.ledger.events().len();

        std::thread::scope(|scope| {
            for (from, to) in [(BUYER, SECOND_BUYER), (SECOND_BUYER, BUYER)] {
                let ledger = &market.ledger;
                scope.spawn(move || {
                    for _ in 0..20 {
                        ledger
                            .transfer(&ctx(from), idc(from), idc(to), id, whole_units(1))
                            .unwrap();
                    }
                });
            }
        });

        assert_eq!(market.balance(BUYER, &id), whole_units(50));
        assert_eq!(market.balance(SECOND_BUYER, &id), whole_units(50));
        assert_eq!(market.ledger.total_supply(&id), whole_units(100));
        assert_eq!(market.ledger.events().len(), events_before + 40);

        let sequences: Vec<u64> = market.ledger.events().iter().map(|e| e.sequence).collect();
        assert!(sequences.windows(2).all(|pair| pair[1] == pair[0] + 1));
    }
}
