//! # Scenario Replay
//!
//! A scenario is a JSON document listing identity setup and ledger operations
//! in order. It is replayed against a fresh ledger with a fixed clock, so the
//! same scenario always yields the same snapshot and digest.
//!
//! ```json
//! {
//!   "start_time": 1600000000,
//!   "steps": [
//!     { "op": "register_identity", "identity": "0x10..", "owner": "0xe0.." },
//!     { "op": "create_forward_series",
//!       "caller": { "signer": "0xe0..", "via_identity": "0x10.." },
//!       "period": 1737540001, "kind": "GenerationBasedForward",
//!       "reference_account": "0x10..", "distributor": "0x18.." }
//!   ]
//! }
//! ```
//!
//! Quantities are decimal strings (`"17000000000000000000"`), `0x` hex
//! strings, or plain JSON integers. Tokens are either a raw id string or a
//! `{ "kind", "period", "account" }` descriptor.

use crate::container::LedgerConfig;
use crate::errors::RuntimeError;
use crate::events::SequencedEvent;
use crate::service::EnergyLedger;
use crate::snapshot::LedgerSnapshot;
use et_01_token_codec::{TokenDescriptor, TokenKind};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use shared_types::{
    Address, CallContext, ClaimTopic, FixedClock, InMemoryClaimsRegistry, LedgerResult,
    SettlementPeriod, Timestamp, TokenId, U256,
};
use std::sync::Arc;
use tracing::info;

/// A token quantity in scenario files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(pub U256);

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(U256::from(n))),
            Raw::Text(text) => {
                let text = text.trim();
                let parsed = match text.strip_prefix("0x") {
                    Some(hex) => U256::from_str_radix(hex, 16).map_err(|e| e.to_string()),
                    None => U256::from_dec_str(text).map_err(|e| format!("{e:?}")),
                };
                parsed
                    .map(Self)
                    .map_err(|e| de::Error::custom(format!("invalid amount '{text}': {e}")))
            }
        }
    }
}

/// A token given by id or by its attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenRef {
    Id(TokenId),
    Descriptor(TokenDescriptor),
}

impl TokenRef {
    pub fn token_id(&self) -> TokenId {
        match self {
            Self::Id(id) => *id,
            Self::Descriptor(descriptor) => descriptor.token_id(),
        }
    }
}

/// One scenario step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    RegisterIdentity {
        identity: Address,
        owner: Address,
    },
    AddClaims {
        subject: Address,
        topics: Vec<ClaimTopic>,
        expiry: Timestamp,
    },
    RevokeClaim {
        subject: Address,
        topic: ClaimTopic,
    },
    SetTime {
        now: Timestamp,
    },
    AdvanceTime {
        secs: u64,
    },
    ApproveReception {
        caller: CallContext,
        approver: Address,
        sender: Address,
        token: TokenRef,
        max_quantity: Amount,
        expiry: Timestamp,
    },
    Transfer {
        caller: CallContext,
        from: Address,
        to: Address,
        token: TokenRef,
        quantity: Amount,
    },
    BatchTransfer {
        caller: CallContext,
        from: Address,
        to: Address,
        tokens: Vec<TokenRef>,
        quantities: Vec<Amount>,
    },
    Mint {
        caller: CallContext,
        token: TokenRef,
        recipients: Vec<Address>,
        quantities: Vec<Amount>,
    },
    CreateForwardSeries {
        caller: CallContext,
        period: SettlementPeriod,
        kind: TokenKind,
        reference_account: Address,
        distributor: Address,
    },
    RecordGeneration {
        caller: CallContext,
        account: Address,
        value: Amount,
        period: SettlementPeriod,
        #[serde(default)]
        is_corrected: bool,
    },
    RecordConsumption {
        caller: CallContext,
        account: Address,
        value: Amount,
        period: SettlementPeriod,
        #[serde(default)]
        is_corrected: bool,
    },
    Distribute {
        recipient: Address,
        forward: TokenRef,
    },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RegisterIdentity { .. } => "register_identity",
            Self::AddClaims { .. } => "add_claims",
            Self::RevokeClaim { .. } => "revoke_claim",
            Self::SetTime { .. } => "set_time",
            Self::AdvanceTime { .. } => "advance_time",
            Self::ApproveReception { .. } => "approve_reception",
            Self::Transfer { .. } => "transfer",
            Self::BatchTransfer { .. } => "batch_transfer",
            Self::Mint { .. } => "mint",
            Self::CreateForwardSeries { .. } => "create_forward_series",
            Self::RecordGeneration { .. } => "record_generation",
            Self::RecordConsumption { .. } => "record_consumption",
            Self::Distribute { .. } => "distribute",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Initial clock reading, unix seconds.
    #[serde(default)]
    pub start_time: Timestamp,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_json(input: &str) -> Result<Self, RuntimeError> {
        serde_json::from_str(input).map_err(|e| RuntimeError::InvalidScenario(e.to_string()))
    }
}

/// Final state of a replayed scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub steps: usize,
    pub state_digest: String,
    pub snapshot: LedgerSnapshot,
    pub events: Vec<SequencedEvent>,
}

/// Fresh ledger plus the in-memory identity registry and clock it runs on.
pub struct ScenarioRunner {
    clock: Arc<FixedClock>,
    claims: Arc<InMemoryClaimsRegistry>,
    ledger: EnergyLedger,
}

impl ScenarioRunner {
    pub fn new(config: LedgerConfig, start_time: Timestamp) -> Self {
        let clock = Arc::new(FixedClock::new(start_time));
        let claims = Arc::new(InMemoryClaimsRegistry::new());
        let ledger = EnergyLedger::new(config, claims.clone(), clock.clone());
        Self {
            clock,
            claims,
            ledger,
        }
    }

    pub fn ledger(&self) -> &EnergyLedger {
        &self.ledger
    }

    pub fn claims(&self) -> &InMemoryClaimsRegistry {
        &self.claims
    }

    /// Replays `scenario` on a fresh ledger. Stops at the first failing step.
    pub fn run(scenario: &Scenario, config: LedgerConfig) -> Result<ScenarioReport, RuntimeError> {
        let runner = Self::new(config, scenario.start_time);
        for (index, step) in scenario.steps.iter().enumerate() {
            runner
                .apply(step)
                .map_err(|source| RuntimeError::ScenarioStep {
                    step: index + 1,
                    op: step.name(),
                    source,
                })?;
        }
        let report = runner.report(scenario.steps.len())?;
        info!(steps = report.steps, digest = %report.state_digest, "Scenario replayed");
        Ok(report)
    }

    pub fn report(&self, steps: usize) -> Result<ScenarioReport, RuntimeError> {
        let snapshot = self.ledger.snapshot();
        Ok(ScenarioReport {
            steps,
            state_digest: snapshot.state_digest_hex()?,
            snapshot,
            events: self.ledger.events(),
        })
    }

    /// Applies one step.
    pub fn apply(&self, step: &Step) -> LedgerResult<()> {
        match step {
            Step::RegisterIdentity { identity, owner } => {
                self.claims.register_identity(*identity, *owner);
            }
            Step::AddClaims {
                subject,
                topics,
                expiry,
            } => {
                self.claims.add_claims(*subject, topics, *expiry);
            }
            Step::RevokeClaim { subject, topic } => {
                self.claims.revoke_claim(subject, *topic);
            }
            Step::SetTime { now } => self.clock.set(*now),
            Step::AdvanceTime { secs } => self.clock.advance(*secs),
            Step::ApproveReception {
                caller,
                approver,
                sender,
                token,
                max_quantity,
                expiry,
            } => {
                self.ledger.approve_reception(
                    caller,
                    *approver,
                    *sender,
                    token.token_id(),
                    max_quantity.0,
                    *expiry,
                )?;
            }
            Step::Transfer {
                caller,
                from,
                to,
                token,
                quantity,
            } => {
                self.ledger
                    .transfer(caller, *from, *to, token.token_id(), quantity.0)?;
            }
            Step::BatchTransfer {
                caller,
                from,
                to,
                tokens,
                quantities,
            } => {
                let ids: Vec<TokenId> = tokens.iter().map(TokenRef::token_id).collect();
                let quantities: Vec<U256> = quantities.iter().map(|q| q.0).collect();
                self.ledger
                    .batch_transfer(caller, *from, *to, &ids, &quantities)?;
            }
            Step::Mint {
                caller,
                token,
                recipients,
                quantities,
            } => {
                let quantities: Vec<U256> = quantities.iter().map(|q| q.0).collect();
                self.ledger
                    .mint(caller, token.token_id(), recipients, &quantities)?;
            }
            Step::CreateForwardSeries {
                caller,
                period,
                kind,
                reference_account,
                distributor,
            } => {
                self.ledger.create_forward_series(
                    caller,
                    *period,
                    *kind,
                    *reference_account,
                    *distributor,
                )?;
            }
            Step::RecordGeneration {
                caller,
                account,
                value,
                period,
                is_corrected,
            } => {
                self.ledger.record_measured_generation(
                    caller,
                    *account,
                    value.0,
                    *period,
                    *is_corrected,
                )?;
            }
            Step::RecordConsumption {
                caller,
                account,
                value,
                period,
                is_corrected,
            } => {
                self.ledger.record_measured_consumption(
                    caller,
                    *account,
                    value.0,
                    *period,
                    *is_corrected,
                )?;
            }
            Step::Distribute { recipient, forward } => {
                self.ledger.distribute(*recipient, forward.token_id())?;
            }
        }
        Ok(())
    }
}
