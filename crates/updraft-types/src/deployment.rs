//! Deployment resources for rolling and canary rollouts

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the platform shifts an application to a new droplet or revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStrategy {
    /// Direct lifecycle path: stop, set droplet, start. No deployment
    /// resource is created.
    #[default]
    Default,
    /// Gradual instance replacement bounded by max-in-flight
    Rolling,
    /// Weighted staged rollout driven by an ordered step sequence
    Canary,
}

impl DeploymentStrategy {
    /// The wire form the control plane expects for deployment requests
    pub fn as_str(self) -> &'static str {
        match self {
            DeploymentStrategy::Default => "default",
            DeploymentStrategy::Rolling => "rolling",
            DeploymentStrategy::Canary => "canary",
        }
    }
}

impl fmt::Display for DeploymentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a strategy name given on the command line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid deployment strategy '{0}', expected 'rolling' or 'canary'")]
pub struct InvalidStrategy(pub String);

impl FromStr for DeploymentStrategy {
    type Err = InvalidStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "default" => Ok(DeploymentStrategy::Default),
            "rolling" => Ok(DeploymentStrategy::Rolling),
            "canary" => Ok(DeploymentStrategy::Canary),
            other => Err(InvalidStrategy(other.to_string())),
        }
    }
}

/// One weight increment of a canary rollout.
///
/// Steps form an ordered sequence; the order is the rollout order and must
/// be preserved end to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanaryStep {
    pub instance_weight: u32,
}

/// Rollout tuning carried on a deployment request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentOptions {
    /// Maximum instances simultaneously being replaced
    pub max_in_flight: u32,
    /// Present iff the strategy is canary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canary_steps: Option<Vec<CanaryStep>>,
}

/// What the deployment rolls the application onto.
///
/// Droplet and revision targets are mutually exclusive, so they are one
/// variant each rather than two optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentTarget {
    /// Roll onto a staged droplet
    Droplet(String),
    /// Roll back onto an application revision
    Revision(String),
}

/// Request to create a deployment resource on the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRequest {
    /// Application the deployment belongs to
    pub app_guid: String,
    pub strategy: DeploymentStrategy,
    pub options: DeploymentOptions,
    /// Omitted when the platform should keep the current droplet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<DeploymentTarget>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_round_trips_through_its_wire_name() {
        for strategy in [
            DeploymentStrategy::Default,
            DeploymentStrategy::Rolling,
            DeploymentStrategy::Canary,
        ] {
            assert_eq!(strategy.as_str().parse(), Ok(strategy));
        }
        assert!("blue-green".parse::<DeploymentStrategy>().is_err());
    }

    #[test]
    fn canary_steps_keep_their_order() {
        let options = DeploymentOptions {
            max_in_flight: 2,
            canary_steps: Some(vec![
                CanaryStep { instance_weight: 1 },
                CanaryStep { instance_weight: 20 },
                CanaryStep { instance_weight: 3 },
            ]),
        };
        let weights: Vec<u32> = options
            .canary_steps
            .unwrap()
            .iter()
            .map(|s| s.instance_weight)
            .collect();
        assert_eq!(weights, vec![1, 20, 3]);
    }
}
