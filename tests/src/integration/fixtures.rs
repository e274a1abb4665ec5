//! # Market Fixture
//!
//! A ledger with a small cast of identities:
//!
//! | Index | Role | Claims |
//! |-------|------|--------|
//! | 0 | plant (reference site) | none |
//! | 1 | buyer | forward + certificate reception |
//! | 2 | second buyer | forward + certificate reception |
//! | 5 | outsider | none |
//! | 8 | distributor | reception + accepted distributor |
//! | 9 | metering authority | `IS_METERING_AUTHORITY` |
//!
//! Identity `n` is `[0x10 + n; 20]`, owned by key `[0xE0 + n; 20]`.

use et_01_token_codec::{encode, TokenKind};
use ledger_runtime::{EnergyLedger, LedgerConfig};
use shared_types::{
    unit, whole_units, Address, CallContext, ClaimTopic, FixedClock, InMemoryClaimsRegistry,
    SettlementPeriod, Timestamp, TokenId, U256,
};
use std::sync::Arc;

pub const NOW: Timestamp = 1_600_000_000;
pub const EXPIRY: Timestamp = 1_895_220_001;
pub const PERIOD: SettlementPeriod = 1_737_540_001;

pub const PLANT: u8 = 0;
pub const BUYER: u8 = 1;
pub const SECOND_BUYER: u8 = 2;
pub const OUTSIDER: u8 = 5;
pub const DISTRIBUTOR: u8 = 8;
pub const METER: u8 = 9;

const PARTICIPANT_CLAIMS: [ClaimTopic; 4] = [
    ClaimTopic::METERING,
    ClaimTopic::BALANCE,
    ClaimTopic::EXISTENCE,
    ClaimTopic::ACCEPTED_DISTRIBUTOR,
];

pub fn idc(n: u8) -> Address {
    Address::new([0x10 + n; 20])
}

pub fn key(n: u8) -> Address {
    Address::new([0xE0 + n; 20])
}

/// Call from key `n` through identity `n`.
pub fn ctx(n: u8) -> CallContext {
    CallContext::via(key(n), idc(n))
}

/// `n / 100` units.
pub fn hundredths(n: u64) -> U256 {
    unit() * U256::from(n) / U256::from(100)
}

pub struct Market {
    pub ledger: EnergyLedger,
    pub claims: Arc<InMemoryClaimsRegistry>,
    pub clock: Arc<FixedClock>,
}

impl Market {
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        let clock = Arc::new(FixedClock::new(NOW));
        let claims = Arc::new(InMemoryClaimsRegistry::new());
        for n in [PLANT, BUYER, SECOND_BUYER, OUTSIDER, DISTRIBUTOR, METER] {
            claims.register_identity(idc(n), key(n));
        }
        for n in [BUYER, SECOND_BUYER, DISTRIBUTOR] {
            claims.add_claims(idc(n), &PARTICIPANT_CLAIMS, EXPIRY);
        }
        claims.add_claim(idc(METER), ClaimTopic::IS_METERING_AUTHORITY, EXPIRY);

        let ledger = EnergyLedger::new(config, claims.clone(), clock.clone());
        Self {
            ledger,
            claims,
            clock,
        }
    }

    /// The certificate every plant forward at `period` settles into.
    pub fn certificate_at(&self, period: SettlementPeriod) -> TokenId {
        encode(TokenKind::Certificate, period, &idc(PLANT))
    }

    pub fn certificate(&self) -> TokenId {
        self.certificate_at(PERIOD)
    }

    /// Metering authority mints `whole` certificates to `to`.
    pub fn issue_certificates(&self, period: SettlementPeriod, to: u8, whole: u64) {
        self.ledger
            .mint(
                &ctx(METER),
                self.certificate_at(period),
                &[idc(to)],
                &[whole_units(whole)],
            )
            .unwrap();
    }

    /// Plant opens a `kind` series at `period`, settled by the distributor.
    pub fn open_series(&self, kind: TokenKind, period: SettlementPeriod) -> TokenId {
        self.ledger
            .create_forward_series(&ctx(PLANT), period, kind, idc(PLANT), idc(DISTRIBUTOR))
            .unwrap()
            .token_id
    }

    /// Plant mints `whole` units of its forward `id` to `to`.
    pub fn sell(&self, id: TokenId, to: u8, whole: u64) {
        self.ledger
            .mint(&ctx(PLANT), id, &[idc(to)], &[whole_units(whole)])
            .unwrap();
    }

    pub fn document_generation(&self, whole: u64, is_corrected: bool) {
        self.document_generation_at(PERIOD, whole, is_corrected);
    }

    pub fn document_generation_at(&self, period: SettlementPeriod, whole: u64, is_corrected: bool) {
        self.ledger
            .record_measured_generation(
                &ctx(METER),
                idc(PLANT),
                whole_units(whole),
                period,
                is_corrected,
            )
            .unwrap();
    }

    pub fn document_consumption(&self, n: u8, whole: u64, is_corrected: bool) {
        self.document_consumption_at(n, PERIOD, whole, is_corrected);
    }

    pub fn document_consumption_at(
        &self,
        n: u8,
        period: SettlementPeriod,
        whole: u64,
        is_corrected: bool,
    ) {
        self.ledger
            .record_measured_consumption(&ctx(METER), idc(n), whole_units(whole), period, is_corrected)
            .unwrap();
    }

    /// `n` hands `quantity` certificates of `period` back to the
    /// distributor, which approves the reception first.
    pub fn return_certificates(&self, n: u8, period: SettlementPeriod, quantity: U256) {
        let certificate = self.certificate_at(period);
        self.ledger
            .approve_reception(
                &ctx(DISTRIBUTOR),
                idc(DISTRIBUTOR),
                idc(n),
                certificate,
                quantity,
                EXPIRY,
            )
            .unwrap();
        self.ledger
            .transfer(&ctx(n), idc(n), idc(DISTRIBUTOR), certificate, quantity)
            .unwrap();
    }

    /// `approver` lets `sender` push up to `whole` units of `id`.
    pub fn approve(&self, approver: u8, sender: u8, id: TokenId, whole: u64) {
        self.ledger
            .approve_reception(
                &ctx(approver),
                idc(approver),
                idc(sender),
                id,
                whole_units(whole),
                EXPIRY,
            )
            .unwrap();
    }

    pub fn balance(&self, n: u8, id: &TokenId) -> U256 {
        self.ledger.balance_of(&idc(n), id)
    }

    pub fn certificates(&self, n: u8) -> U256 {
        self.balance(n, &self.certificate())
    }
}

impl Default for Market {
    fn default() -> Self {
        Self::new()
    }
}
