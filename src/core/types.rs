use crate::core::PricingError;

/// Plain-vanilla option side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    /// Call option payoff profile.
    Call,
    /// Put option payoff profile.
    Put,
}

impl OptionType {
    /// Returns +1.0 for calls and -1.0 for puts.
    pub fn sign(self) -> f64 {
        match self {
            Self::Call => 1.0,
            Self::Put => -1.0,
        }
    }

    /// Terminal payoff kernel: `max(S-K, 0)` for calls, `max(K-S, 0)` for puts.
    #[inline]
    pub fn payoff(self, spot: f64, strike: f64) -> f64 {
        match self {
            Self::Call => (spot - strike).max(0.0),
            Self::Put => (strike - spot).max(0.0),
        }
    }
}

/// Exercise rights for an option contract.
#[derive(Debug, Clone, PartialEq)]
pub enum ExerciseStyle {
    /// Exercise only at expiry.
    European,
    /// Exercise at any admissible date up to expiry.
    American,
    /// Exercise at specific times (in year fractions).
    Bermudan { dates: Vec<f64> },
}

/// Barrier crossing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierDirection {
    /// Barrier is breached when spot moves upward through the level.
    Up,
    /// Barrier is breached when spot moves downward through the level.
    Down,
}

/// Barrier knock behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierStyle {
    /// Option activates once the barrier is hit.
    In,
    /// Option deactivates once the barrier is hit.
    Out,
}

/// Combined barrier contract variant, matching the wire encoding used by
/// the service layer (0: up-and-out, 1: up-and-in, 2: down-and-out,
/// 3: down-and-in).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierVariant {
    UpAndOut,
    UpAndIn,
    DownAndOut,
    DownAndIn,
}

impl BarrierVariant {
    /// Decodes the integer wire representation.
    pub fn from_code(code: i32) -> Result<Self, PricingError> {
        match code {
            0 => Ok(Self::UpAndOut),
            1 => Ok(Self::UpAndIn),
            2 => Ok(Self::DownAndOut),
            3 => Ok(Self::DownAndIn),
            other => Err(PricingError::InvalidParameter(format!(
                "barrier variant code must be in 0..=3, got {other}"
            ))),
        }
    }

    /// Crossing direction of this variant.
    pub fn direction(self) -> BarrierDirection {
        match self {
            Self::UpAndOut | Self::UpAndIn => BarrierDirection::Up,
            Self::DownAndOut | Self::DownAndIn => BarrierDirection::Down,
        }
    }

    /// Knock style of this variant.
    pub fn style(self) -> BarrierStyle {
        match self {
            Self::UpAndOut | Self::DownAndOut => BarrierStyle::Out,
            Self::UpAndIn | Self::DownAndIn => BarrierStyle::In,
        }
    }
}

/// Barrier contract parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BarrierSpec {
    /// Barrier direction.
    pub direction: BarrierDirection,
    /// Knock-in or knock-out.
    pub style: BarrierStyle,
    /// Barrier level in spot units.
    pub level: f64,
    /// Cash rebate paid when the knock condition leaves the option worthless.
    pub rebate: f64,
}

impl BarrierSpec {
    /// Builds barrier terms from the combined variant encoding.
    pub fn from_variant(variant: BarrierVariant, level: f64, rebate: f64) -> Self {
        Self {
            direction: variant.direction(),
            style: variant.style(),
            level,
            rebate,
        }
    }

    /// Returns true when the discretely sampled path touches the barrier.
    pub fn breached(&self, path: &[f64]) -> bool {
        match self.direction {
            BarrierDirection::Up => path.iter().any(|&s| s >= self.level),
            BarrierDirection::Down => path.iter().any(|&s| s <= self.level),
        }
    }
}

/// Stochastic model driving the underlying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelKind {
    /// Geometric Brownian motion (the only implemented dynamics).
    #[default]
    Gbm,
    /// Stochastic-alpha-beta-rho dynamics, reserved for a future engine.
    Sabr,
}
