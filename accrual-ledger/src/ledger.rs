//! Main ledger orchestration layer
//!
//! This module ties together holder accounts, the global rate, capability
//! checks, and allowances into a high-level API for balance operations.
//!
//! Every balance-mutating operation settles the affected holder(s) first,
//! then performs its checks and mutations on private copies that are only
//! written back on success. A failed call therefore leaves no observable
//! state change, including uncommitted settlement.
//!
//! # Example
//!
//! ```
//! use accrual_ledger::{Config, HolderId, Ledger, SystemClock};
//! use std::sync::Arc;
//!
//! let config = Config::default();
//! let owner = config.owner.clone();
//! let ledger = Ledger::new(config, Arc::new(SystemClock));
//!
//! let minter = HolderId::new("gateway");
//! ledger.grant_mint_burn(&owner, &minter).unwrap();
//!
//! let alice = HolderId::new("alice");
//! ledger.mint(&minter, &alice, 1_000, ledger.global_rate()).unwrap();
//! assert_eq!(ledger.principal(&alice), 1_000);
//! ```

use crate::{
    clock::Clock,
    config::Config,
    types::{HolderAccount, HolderId, MAX_AMOUNT, UNLIMITED_ALLOWANCE},
    Error, Result,
};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Interior mutable ledger state, guarded by a single lock.
///
/// One write lock per operation gives the atomic settle/check/mutate unit the
/// concurrency model requires; pure reads share the read lock.
#[derive(Debug, Default)]
struct State {
    /// Current global rate (monotonically non-increasing)
    global_rate: u64,

    /// Holder accounts, implicitly created on first reference
    accounts: HashMap<HolderId, HolderAccount>,

    /// Allowances keyed by (owner, spender)
    allowances: HashMap<(HolderId, HolderId), u64>,

    /// Identities holding the mint/burn capability
    mint_burn: HashSet<HolderId>,

    /// Sum of all settled principal (realized interest included)
    total_principal: u64,
}

/// Interest-accruing ledger instance
///
/// Each instance is fully independent: it owns its own global rate and holder
/// table. Cross-ledger coupling happens only through the bridge payload.
pub struct Ledger {
    /// Guarded interior state
    state: RwLock<State>,

    /// Time source for accrual
    clock: Arc<dyn Clock>,

    /// Rate-setter and capability granter
    owner: HolderId,

    /// Designated null/burn identity; never a valid transfer recipient
    null_identity: HolderId,
}

impl Ledger {
    /// Create a ledger from configuration
    pub fn new(config: Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(State {
                global_rate: config.initial_rate,
                ..State::default()
            }),
            clock,
            owner: config.owner,
            null_identity: config.null_identity,
        }
    }

    // ---- Pure reads ----

    /// Current global rate
    pub fn global_rate(&self) -> u64 {
        self.state.read().global_rate
    }

    /// Locked rate bound to `holder` (0 for holders with no history)
    pub fn holder_rate(&self, holder: &HolderId) -> u64 {
        self.state
            .read()
            .accounts
            .get(holder)
            .map(|a| a.locked_rate)
            .unwrap_or(0)
    }

    /// Stored principal of `holder`, with no accrual applied
    pub fn principal(&self, holder: &HolderId) -> u64 {
        self.state
            .read()
            .accounts
            .get(holder)
            .map(|a| a.principal)
            .unwrap_or(0)
    }

    /// Observed balance of `holder`: principal plus interest accrued to now.
    ///
    /// Computed freshly on every call and never cached or committed. Returns
    /// 0 for holders with no history. If the accrual computation overflows,
    /// the read reports the settled principal — the floor actually owed —
    /// rather than overstating the liability; mutating operations on such an
    /// account still fail with [`Error::Overflow`].
    pub fn balance(&self, holder: &HolderId) -> u64 {
        let now = self.clock.now_unix();
        self.state
            .read()
            .accounts
            .get(holder)
            .map(|a| a.balance_at(now).unwrap_or(a.principal))
            .unwrap_or(0)
    }

    /// Allowance granted by `owner` to `spender`
    pub fn allowance(&self, owner: &HolderId, spender: &HolderId) -> u64 {
        self.state
            .read()
            .allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of all settled principal across holders
    pub fn total_principal(&self) -> u64 {
        self.state.read().total_principal
    }

    /// Whether `account` holds the mint/burn capability
    pub fn has_mint_burn(&self, account: &HolderId) -> bool {
        self.state.read().mint_burn.contains(account)
    }

    // ---- Administrative surface ----

    /// Lower the global rate. The sole lever on system-wide future yield.
    ///
    /// Fails with [`Error::RateMustDecrease`] if `new_rate` exceeds the
    /// current rate; equal rates are accepted.
    pub fn set_global_rate(&self, caller: &HolderId, new_rate: u64) -> Result<()> {
        self.require_owner(caller)?;

        let mut state = self.state.write();
        if new_rate > state.global_rate {
            return Err(Error::RateMustDecrease {
                current: state.global_rate,
                requested: new_rate,
            });
        }

        let old_rate = state.global_rate;
        state.global_rate = new_rate;
        tracing::info!(old_rate, new_rate, "global rate updated");
        Ok(())
    }

    /// Grant the mint/burn capability to `account`
    pub fn grant_mint_burn(&self, caller: &HolderId, account: &HolderId) -> Result<()> {
        self.require_owner(caller)?;
        self.state.write().mint_burn.insert(account.clone());
        tracing::info!(account = %account, "mint/burn capability granted");
        Ok(())
    }

    /// Revoke the mint/burn capability from `account`
    pub fn revoke_mint_burn(&self, caller: &HolderId, account: &HolderId) -> Result<()> {
        self.require_owner(caller)?;
        self.state.write().mint_burn.remove(account);
        tracing::info!(account = %account, "mint/burn capability revoked");
        Ok(())
    }

    // ---- Capability-gated mutations ----

    /// Mint `amount` to `holder` at `rate`.
    ///
    /// Settles `holder` first. If the settled balance is zero and `amount` is
    /// positive, the holder's locked rate is set to `rate` (first-funding
    /// capture). The gateway path supplies the current global rate; the
    /// bridge inbound path supplies the rate carried in the message.
    pub fn mint(&self, caller: &HolderId, holder: &HolderId, amount: u64, rate: u64) -> Result<()> {
        let now = self.clock.now_unix();
        let mut state = self.state.write();
        state.require_mint_burn(caller)?;

        let mut account = state.accounts.get(holder).copied().unwrap_or_default();
        let realized = account.settle(now)?;

        if account.principal == 0 && amount > 0 {
            account.locked_rate = rate;
        }
        account.principal = account
            .principal
            .checked_add(amount)
            .ok_or_else(|| Error::Overflow("mint exceeds u64 principal".to_string()))?;

        let total = state
            .total_principal
            .checked_add(realized)
            .and_then(|t| t.checked_add(amount))
            .ok_or_else(|| Error::Overflow("mint exceeds u64 total supply".to_string()))?;

        state.accounts.insert(holder.clone(), account);
        state.total_principal = total;
        tracing::debug!(holder = %holder, amount, rate, "minted");
        Ok(())
    }

    /// Burn `amount` from `holder`, returning the resolved amount.
    ///
    /// Settles `holder` first. [`MAX_AMOUNT`] resolves to the holder's full
    /// settled balance, leaving it at exactly zero.
    pub fn burn(&self, caller: &HolderId, holder: &HolderId, amount: u64) -> Result<u64> {
        let now = self.clock.now_unix();
        let mut state = self.state.write();
        state.require_mint_burn(caller)?;

        let mut account = state.accounts.get(holder).copied().unwrap_or_default();
        let realized = account.settle(now)?;

        let resolved = if amount == MAX_AMOUNT {
            account.principal
        } else {
            amount
        };
        if resolved > account.principal {
            return Err(Error::InsufficientBalance {
                available: account.principal,
                requested: resolved,
            });
        }
        account.principal -= resolved;

        let total = state
            .total_principal
            .checked_add(realized)
            .and_then(|t| t.checked_sub(resolved))
            .ok_or_else(|| Error::Overflow("total supply accounting".to_string()))?;

        state.accounts.insert(holder.clone(), account);
        state.total_principal = total;
        tracing::debug!(holder = %holder, resolved, "burned");
        Ok(resolved)
    }

    // ---- Holder-driven mutations ----

    /// Move `amount` from `sender` to `recipient`, returning the resolved
    /// amount.
    ///
    /// Both parties settle before the rate-inheritance check. A recipient
    /// with zero settled balance inherits the sender's locked rate, not the
    /// current global rate. [`MAX_AMOUNT`] resolves to the sender's full
    /// settled balance.
    pub fn transfer(&self, sender: &HolderId, recipient: &HolderId, amount: u64) -> Result<u64> {
        let now = self.clock.now_unix();
        let mut state = self.state.write();
        self.do_transfer(&mut state, now, sender, recipient, amount)
    }

    /// Set the allowance granted by `owner` to `spender`.
    ///
    /// [`UNLIMITED_ALLOWANCE`] is the sentinel for an allowance that is never
    /// decremented on spend.
    pub fn approve(&self, owner: &HolderId, spender: &HolderId, amount: u64) {
        self.state
            .write()
            .allowances
            .insert((owner.clone(), spender.clone()), amount);
        tracing::debug!(owner = %owner, spender = %spender, amount, "allowance set");
    }

    /// Transfer on behalf of `owner`, spending `spender`'s allowance.
    ///
    /// As [`Ledger::transfer`], additionally checking and decrementing the
    /// allowance by the resolved amount (unless set to
    /// [`UNLIMITED_ALLOWANCE`]). [`MAX_AMOUNT`] resolves against the owner's
    /// settled balance, not against the allowance.
    pub fn transfer_from(
        &self,
        spender: &HolderId,
        owner: &HolderId,
        recipient: &HolderId,
        amount: u64,
    ) -> Result<u64> {
        let now = self.clock.now_unix();
        let mut state = self.state.write();

        // Resolve the sentinel on an uncommitted settlement copy so the
        // allowance check sees the true amount before anything moves.
        let mut preview = state.accounts.get(owner).copied().unwrap_or_default();
        preview.settle(now)?;
        let resolved = if amount == MAX_AMOUNT {
            preview.principal
        } else {
            amount
        };

        let key = (owner.clone(), spender.clone());
        let allowance = state.allowances.get(&key).copied().unwrap_or(0);
        if allowance != UNLIMITED_ALLOWANCE && allowance < resolved {
            return Err(Error::InsufficientAllowance {
                available: allowance,
                requested: resolved,
            });
        }

        let moved = self.do_transfer(&mut state, now, owner, recipient, resolved)?;
        if allowance != UNLIMITED_ALLOWANCE {
            state.allowances.insert(key, allowance - moved);
        }
        Ok(moved)
    }

    // ---- Internals ----

    fn require_owner(&self, caller: &HolderId) -> Result<()> {
        if caller != &self.owner {
            return Err(Error::Unauthorized(format!(
                "{} is not the ledger owner",
                caller
            )));
        }
        Ok(())
    }

    /// Settle both parties, resolve the amount, apply rate inheritance, and
    /// move principal. All writes land only after every check passes.
    fn do_transfer(
        &self,
        state: &mut State,
        now: u64,
        sender: &HolderId,
        recipient: &HolderId,
        amount: u64,
    ) -> Result<u64> {
        if recipient == &self.null_identity {
            return Err(Error::InvalidRecipient(recipient.to_string()));
        }

        let mut sender_account = state.accounts.get(sender).copied().unwrap_or_default();
        let sender_realized = sender_account.settle(now)?;

        let resolved = if amount == MAX_AMOUNT {
            sender_account.principal
        } else {
            amount
        };
        if resolved > sender_account.principal {
            return Err(Error::InsufficientBalance {
                available: sender_account.principal,
                requested: resolved,
            });
        }

        if sender == recipient {
            // Settle-only: nothing moves, but the balance check above still
            // applies and the settlement commits.
            let total = state
                .total_principal
                .checked_add(sender_realized)
                .ok_or_else(|| Error::Overflow("total supply accounting".to_string()))?;
            state.accounts.insert(sender.clone(), sender_account);
            state.total_principal = total;
            return Ok(resolved);
        }

        let mut recipient_account = state.accounts.get(recipient).copied().unwrap_or_default();
        let recipient_realized = recipient_account.settle(now)?;

        // Inheritance: a recipient whose settled balance is zero takes the
        // sender's locked rate, preserving the economic value the rate
        // represents as it moves between holders.
        if resolved > 0 && recipient_account.principal == 0 {
            recipient_account.locked_rate = sender_account.locked_rate;
        }

        recipient_account.principal = recipient_account
            .principal
            .checked_add(resolved)
            .ok_or_else(|| Error::Overflow("transfer exceeds u64 principal".to_string()))?;
        sender_account.principal -= resolved;

        let total = state
            .total_principal
            .checked_add(sender_realized)
            .and_then(|t| t.checked_add(recipient_realized))
            .ok_or_else(|| Error::Overflow("total supply accounting".to_string()))?;

        state.accounts.insert(sender.clone(), sender_account);
        state.accounts.insert(recipient.clone(), recipient_account);
        state.total_principal = total;
        tracing::debug!(sender = %sender, recipient = %recipient, resolved, "transferred");
        Ok(resolved)
    }
}

impl State {
    fn require_mint_burn(&self, caller: &HolderId) -> Result<()> {
        if !self.mint_burn.contains(caller) {
            return Err(Error::Unauthorized(format!(
                "{} lacks the mint/burn capability",
                caller
            )));
        }
        Ok(())
    }
}
