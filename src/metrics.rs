use serde::Serialize;

/// One entry of the metric schema shared by the detail panel and the comparison chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricDef {
    pub id: &'static str,
    pub name: &'static str,
    // Percentile computed within the player's position group, not league-wide.
    pub position_relative: bool,
}

const fn metric(id: &'static str, name: &'static str, position_relative: bool) -> MetricDef {
    MetricDef {
        id,
        name,
        position_relative,
    }
}

static METRIC_SCHEMA: [MetricDef; 10] = [
    metric("ast_tov_ratio", "AST/TOV Ratio", false),
    metric("clutch_ast_tov", "Clutch AST/TOV", false),
    metric("ast_pct", "Assist %", false),
    metric("screen_assists_per_36", "Screen Assists per 36", true),
    metric("efg_pct", "Effective FG%", false),
    metric("late_clock_efficiency", "Late Clock Efficiency", false),
    metric("deflections_per_36", "Deflections per 36", false),
    metric("shooting_foul_pct", "Shooting Foul Rate", true),
    metric("personal_foul_rate", "Personal Fouls per 36", false),
    metric("age", "Age", false),
];

/// Fixed metric order. The comparison chart draws it top to bottom and the
/// detail panel iterates it in the same order.
pub fn metric_schema() -> &'static [MetricDef] {
    &METRIC_SCHEMA
}

pub fn find_metric(id: &str) -> Option<&'static MetricDef> {
    METRIC_SCHEMA.iter().find(|def| def.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn schema_ids_are_unique() {
        let ids: HashSet<&str> = metric_schema().iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), metric_schema().len());
    }

    #[test]
    fn find_metric_by_id() {
        let def = find_metric("shooting_foul_pct").expect("metric exists");
        assert_eq!(def.name, "Shooting Foul Rate");
        assert!(def.position_relative);
        assert!(find_metric("plus_minus").is_none());
    }

    #[test]
    fn schema_starts_with_playmaking() {
        assert_eq!(metric_schema()[0].id, "ast_tov_ratio");
        assert_eq!(metric_schema()[9].id, "age");
    }
}
