//! Interactive swap state: the selected pair, the side being edited and the
//! last computed outcome

use rust_decimal::Decimal;
use tidal_config::NetworkConfig;
use tidal_types::TokenId;
use tracing::debug;

use crate::error::Result;
use crate::quoter::{SwapOutcome, SwapQuoter, SwapRequest};

/// Side of the swap the caller is typing into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    None,
    Input,
    Output,
}

impl EditMode {
    /// Mode after the pair is reversed
    pub fn flipped(self) -> Self {
        match self {
            EditMode::None => EditMode::None,
            EditMode::Input => EditMode::Output,
            EditMode::Output => EditMode::Input,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SwapSession {
    in_token: TokenId,
    out_token: TokenId,
    edit_mode: EditMode,
    amount_in_human: Option<Decimal>,
    amount_out_human: Option<Decimal>,
    outcome: Option<SwapOutcome>,
}

impl SwapSession {
    pub fn new(in_token: TokenId, out_token: TokenId) -> Self {
        Self {
            in_token,
            out_token,
            edit_mode: EditMode::None,
            amount_in_human: None,
            amount_out_human: None,
            outcome: None,
        }
    }

    /// Session on the configured default pair
    pub fn from_network(network: &NetworkConfig) -> Self {
        Self::new(
            network.default_input_token.clone(),
            network.default_output_token.clone(),
        )
    }

    pub fn in_token(&self) -> &TokenId {
        &self.in_token
    }

    pub fn out_token(&self) -> &TokenId {
        &self.out_token
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    pub fn amount_in_human(&self) -> Option<Decimal> {
        self.amount_in_human
    }

    pub fn amount_out_human(&self) -> Option<Decimal> {
        self.amount_out_human
    }

    pub fn outcome(&self) -> Option<&SwapOutcome> {
        self.outcome.as_ref()
    }

    /// Select a new pair; the previous outcome no longer applies
    pub fn set_pair(&mut self, in_token: TokenId, out_token: TokenId) {
        self.in_token = in_token;
        self.out_token = out_token;
        self.outcome = None;
    }

    pub fn set_input_amount(&mut self, human: Decimal) {
        self.edit_mode = EditMode::Input;
        self.amount_in_human = Some(human);
    }

    pub fn set_output_amount(&mut self, human: Decimal) {
        self.edit_mode = EditMode::Output;
        self.amount_out_human = Some(human);
    }

    /// Swap the two sides, carrying the typed amounts across
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.in_token, &mut self.out_token);
        std::mem::swap(&mut self.amount_in_human, &mut self.amount_out_human);
        self.edit_mode = self.edit_mode.flipped();
    }

    /// Whether the cached outcome is stale for the current pair and amounts
    pub fn needs_recompute(&self, quoter: &SwapQuoter<'_>) -> Result<bool> {
        let Some(outcome) = &self.outcome else {
            return Ok(true);
        };
        if outcome.in_token != self.in_token || outcome.out_token != self.out_token {
            return Ok(true);
        }

        match self.edit_mode {
            EditMode::None => Ok(false),
            EditMode::Input => {
                let amount_in = quoter.clamp_input(
                    &self.in_token,
                    self.amount_in_human.unwrap_or(Decimal::ZERO),
                )?;
                Ok(u128::from(outcome.amount_in) != amount_in)
            }
            EditMode::Output => {
                let desired_out = quoter.clamp_output(
                    &self.in_token,
                    &self.out_token,
                    self.amount_out_human.unwrap_or(Decimal::ZERO),
                )?;
                Ok(u128::from(outcome.expected_amount_out) != desired_out)
            }
        }
    }

    /// Recompute the outcome when stale and fill in the other side's amount
    ///
    /// Returns `true` when a new quote was computed. Nothing is computed
    /// before the caller has typed into either side.
    pub fn refresh(&mut self, quoter: &SwapQuoter<'_>) -> Result<bool> {
        let request = match self.edit_mode {
            EditMode::None => return Ok(false),
            EditMode::Input => {
                SwapRequest::ExactInput(self.amount_in_human.unwrap_or(Decimal::ZERO))
            }
            EditMode::Output => {
                SwapRequest::ExactOutput(self.amount_out_human.unwrap_or(Decimal::ZERO))
            }
        };

        if !self.needs_recompute(quoter)? {
            return Ok(false);
        }

        let outcome = quoter.quote(&self.in_token, &self.out_token, request)?;
        match self.edit_mode {
            EditMode::Input => self.amount_out_human = Some(outcome.amount_out_human),
            EditMode::Output => self.amount_in_human = Some(outcome.amount_in_human),
            EditMode::None => {}
        }

        debug!(
            in_token = %self.in_token,
            out_token = %self.out_token,
            mode = ?self.edit_mode,
            "Swap session recomputed"
        );

        self.outcome = Some(outcome);
        Ok(true)
    }
}
