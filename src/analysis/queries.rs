//! Named insight queries.
//!
//! Fixed aggregate SQL run against the loaded tables. All insights are
//! pure reads; the only parameter any of them takes is a state name,
//! bound positionally.

/// One named insight
#[derive(Debug, Clone, Copy)]
pub struct Insight {
    /// Short name used on the command line
    pub name: &'static str,

    /// Human-readable title shown above the result table
    pub title: &'static str,

    pub sql: &'static str,

    /// Whether the SQL has a `?` placeholder for a state name
    pub needs_state: bool,
}

pub const INSIGHTS: &[Insight] = &[
    Insight {
        name: "app-open-rate",
        title: "States with Lowest App Open Rate",
        sql: "\
SELECT state,
       year,
       SUM(registered_users) AS total_users,
       SUM(app_opens) AS total_opens,
       ROUND(SUM(app_opens) * 100.0 / NULLIF(SUM(registered_users), 0), 2) AS open_rate_pct
FROM aggregated_users
GROUP BY state, year
HAVING SUM(registered_users) > 1000
ORDER BY open_rate_pct ASC
LIMIT 10;",
        needs_state: false,
    },
    Insight {
        name: "txn-efficiency",
        title: "App Opens vs Transactions Efficiency",
        sql: "\
SELECT mu.quarter,
       SUM(mu.app_opens) AS opens,
       SUM(mt.count) AS txns,
       ROUND(SUM(mt.count) * 1.0 / NULLIF(SUM(mu.app_opens), 0), 2) AS txn_per_open
FROM map_users mu
JOIN map_transactions mt
  ON mu.state = mt.state AND mu.year = mt.year AND mu.quarter = mt.quarter
WHERE mu.state = ?
GROUP BY mu.quarter
ORDER BY mu.quarter;",
        needs_state: true,
    },
    Insight {
        name: "state-growth",
        title: "Top Growing States by Transaction Volume",
        sql: "\
SELECT state,
       MIN(year) AS start_year,
       MAX(year) AS end_year,
       ROUND((MAX(yearly_amount) - MIN(yearly_amount)) * 100.0
             / NULLIF(MIN(yearly_amount), 0), 2) AS growth_pct
FROM (
    SELECT state, year, SUM(amount) AS yearly_amount
    FROM aggregated_transactions
    GROUP BY state, year
) AS yearly_data
GROUP BY state
HAVING growth_pct IS NOT NULL
ORDER BY growth_pct DESC
LIMIT 10;",
        needs_state: false,
    },
    Insight {
        name: "quarterly-heatmap",
        title: "Quarterly Heatmap of Transactions by State",
        sql: "\
SELECT state,
       CONCAT(year, '-Q', quarter) AS time_period,
       SUM(amount) AS total_txn_amount
FROM aggregated_transactions
GROUP BY state, year, quarter
ORDER BY state, year, quarter;",
        needs_state: false,
    },
    Insight {
        name: "quarterly-extremes",
        title: "Best and Worst Quarters per State",
        sql: "\
SELECT DISTINCT state,
       MIN(quarterly_amount) OVER (PARTITION BY state) AS min_quarter_amount,
       MAX(quarterly_amount) OVER (PARTITION BY state) AS max_quarter_amount
FROM (
    SELECT state, year, quarter, SUM(amount) AS quarterly_amount
    FROM aggregated_transactions
    GROUP BY state, year, quarter
) AS quarterly
ORDER BY state;",
        needs_state: false,
    },
];

/// Look up an insight by its command-line name
pub fn find_insight(name: &str) -> Option<&'static Insight> {
    INSIGHTS.iter().find(|insight| insight.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_insight() {
        assert!(find_insight("state-growth").is_some());
        assert!(find_insight("no-such-insight").is_none());
    }

    #[test]
    fn test_insight_names_unique() {
        let mut names: Vec<&str> = INSIGHTS.iter().map(|i| i.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), INSIGHTS.len());
    }

    #[test]
    fn test_state_param_marked() {
        for insight in INSIGHTS {
            assert_eq!(insight.needs_state, insight.sql.contains('?'));
        }
    }
}
