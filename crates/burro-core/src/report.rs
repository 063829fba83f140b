//! Human-readable summary of a planned route.
//!
//! One [`VisitReport`] per visited star, in route order, totalling what the
//! donkey ate and how long it researched there.

use std::fmt::Write as _;

use burro_types::StarLabel;
use burro_world::StarMap;

use crate::plan::RoutePlan;

/// What happened at one visited star.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitReport {
    /// Star label.
    pub star: StarLabel,
    /// Constellations the star belongs to.
    pub constellations: Vec<String>,
    /// Kilograms of food eaten here.
    pub food_kg: f64,
    /// Research time units spent here.
    pub research_time: f64,
}

impl VisitReport {
    /// Build the per-star reports for `plan`, in route order.
    pub fn collect(plan: &RoutePlan, map: &StarMap) -> Vec<Self> {
        plan.route
            .iter()
            .map(|label| Self {
                star: label.clone(),
                constellations: map
                    .star(label.as_str())
                    .map(|s| s.constellations.clone())
                    .unwrap_or_default(),
                food_kg: plan
                    .food_log()
                    .iter()
                    .filter(|e| &e.star == label)
                    .map(|e| e.kilograms)
                    .sum(),
                research_time: plan
                    .research_log()
                    .iter()
                    .filter(|e| &e.star == label)
                    .map(|e| e.research_time)
                    .sum(),
            })
            .collect()
    }
}

impl core::fmt::Display for VisitReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let constellations = if self.constellations.is_empty() {
            String::from("-")
        } else {
            self.constellations.join(", ")
        };
        write!(
            f,
            "Star {} ({constellations}): ate {:.2} kg of food, researched for {:.2} time units.",
            self.star, self.food_kg, self.research_time
        )
    }
}

/// Render the full report: a header line, then one paragraph per star.
pub fn render_report(plan: &RoutePlan, map: &StarMap) -> String {
    let mut out = String::new();
    let route = plan
        .route
        .iter()
        .map(StarLabel::as_str)
        .collect::<Vec<_>>()
        .join(" -> ");
    let _ = writeln!(
        out,
        "{} route: {} stars visited, {}.",
        plan.algorithm, plan.visited_count, plan.termination
    );
    let _ = writeln!(out, "Route: {route}");
    let _ = writeln!(
        out,
        "Final state: health {}, energy {:.2}%, food {:.2} kg, life budget {:.2}.",
        plan.donkey.health(),
        plan.donkey.energy(),
        plan.donkey.food(),
        plan.donkey.life_budget()
    );
    for visit in VisitReport::collect(plan, map) {
        let _ = writeln!(out);
        let _ = writeln!(out, "{visit}");
    }
    out
}
