//! Per-point tooltip content

use funnel_core::{ChartTypeKind, Observation};
use funnel_limits::{LimitRecord, OutlierFlags, Transform, TransformFallbacks, TransformKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipItem {
    pub display_name: String,
    pub value: String,
}

impl TooltipItem {
    fn new(display_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            value: value.into(),
        }
    }
}

/// Formats the ordered tooltip rows for an observation
#[derive(Debug, Clone, Copy)]
pub struct TooltipBuilder {
    chart_type: ChartTypeKind,
    transform: Transform,
    sig_figs: usize,
}

impl TooltipBuilder {
    pub fn new(chart_type: ChartTypeKind, transform: Transform, sig_figs: usize) -> Self {
        Self {
            chart_type,
            transform,
            sig_figs,
        }
    }

    /// Proportions shown per hundred get a percent suffix
    fn percent_labels(&self) -> bool {
        self.chart_type == ChartTypeKind::Proportion && self.transform.multiplier() == 100.0
    }

    fn number(&self, value: f64) -> String {
        format!("{:.*}", self.sig_figs, value)
    }

    fn display(&self, value: f64) -> String {
        if self.percent_labels() {
            format!("{}%", self.number(value))
        } else {
            self.number(value)
        }
    }

    /// Rows in display order; limits that are undefined are left out
    pub fn build(
        &self,
        observation: &Observation,
        display_value: f64,
        target: f64,
        limits: Option<&LimitRecord>,
        flags: OutlierFlags,
    ) -> Vec<TooltipItem> {
        // Fallbacks are already counted when the plotted values are built
        let mut scratch = TransformFallbacks::default();
        let mut scaled = |v: f64| self.transform.apply_or_raw(v, &mut scratch);

        let mut items = vec![
            TooltipItem::new("Group", observation.category.clone()),
            TooltipItem::new(self.chart_type.label(), self.display(display_value)),
            TooltipItem::new("Numerator", self.number(observation.numerator)),
            TooltipItem::new("Denominator", self.number(observation.denominator)),
        ];

        if let Some(ul99) = limits.and_then(|l| l.ul99) {
            items.push(TooltipItem::new("Upper 99% Limit", self.display(scaled(ul99))));
        }
        items.push(TooltipItem::new("Centerline", self.display(scaled(target))));
        if let Some(ll99) = limits.and_then(|l| l.ll99) {
            items.push(TooltipItem::new("Lower 99% Limit", self.display(scaled(ll99))));
        }

        if self.transform.kind() != TransformKind::Identity {
            items.push(TooltipItem::new("Plot Scaling", self.transform.kind().name()));
        }
        if flags.any() {
            items.push(TooltipItem::new("Pattern(s)", flags.patterns().join("\n")));
        }
        items
    }
}
