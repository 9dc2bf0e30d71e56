use std::{collections::HashMap, fmt::Display};

use serde::Serialize;

use crate::{
    route::{NodeIssue, RouteNode},
    shared::{Identifiable, geo::Distance},
};

/// Stops closer than this are probably the same place entered twice.
pub const NEAR_DUPLICATE_DISTANCE: Distance = Distance::from_kilometers(1.0);

/// Offsets in use somewhere on earth that are not whole hours.
const FRACTIONAL_OFFSETS: [f64; 12] = [
    -9.5, -3.5, 3.5, 4.5, 5.5, 5.75, 6.5, 8.75, 9.5, 10.5, 12.75, 13.75,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "kind")]
pub enum Finding {
    DuplicateName {
        name: String,
        first: usize,
        second: usize,
    },
    VeryClose {
        first: usize,
        second: usize,
        distance_km: f64,
    },
    UnusualUtcOffset {
        index: usize,
        offset: f64,
    },
    Malformed {
        index: usize,
        issue: NodeIssue,
    },
}

impl Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Finding::DuplicateName {
                name,
                first,
                second,
            } => write!(
                f,
                "Duplicate location name '{name}' at positions {first} and {second}"
            ),
            Finding::VeryClose {
                first,
                second,
                distance_km,
            } => write!(
                f,
                "Very close coordinates between positions {first} and {second} ({distance_km:.3} km)"
            ),
            Finding::UnusualUtcOffset { index, offset } => {
                write!(f, "Unusual UTC offset {offset} at position {index}")
            }
            Finding::Malformed { index, issue } => {
                write!(f, "Malformed node at position {index}: {issue}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub valid: bool,
    pub total_locations: usize,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

pub fn is_standard_offset(offset: f64) -> bool {
    (offset.fract() == 0.0 && (-12.0..=14.0).contains(&offset))
        || FRACTIONAL_OFFSETS.contains(&offset)
}

/// Lints a route for mistakes that recalculation tolerates but an editor
/// should see.
pub fn audit(nodes: &[RouteNode]) -> AuditReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let mut names: HashMap<String, usize> = HashMap::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        let key = node.name().trim().to_lowercase();
        if let Some(&first) = names.get(&key) {
            errors.push(Finding::DuplicateName {
                name: node.name().to_string(),
                first,
                second: index,
            });
        } else {
            names.insert(key, index);
        }

        let offset = node.location.utc_offset_hours;
        if !is_standard_offset(offset) {
            warnings.push(Finding::UnusualUtcOffset { index, offset });
        }
    }

    let mut located = Vec::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        match node.location.coordinate() {
            Ok(coordinate) => located.push((index, coordinate)),
            Err(issue) => warnings.push(Finding::Malformed { index, issue }),
        }
    }
    for (i, (first, a)) in located.iter().enumerate() {
        for (second, b) in located.iter().skip(i + 1) {
            let distance = a.great_circle_distance(b);
            if distance < NEAR_DUPLICATE_DISTANCE {
                warnings.push(Finding::VeryClose {
                    first: *first,
                    second: *second,
                    distance_km: distance.as_kilometers(),
                });
            }
        }
    }

    AuditReport {
        valid: errors.is_empty(),
        total_locations: nodes.len(),
        errors,
        warnings,
    }
}
