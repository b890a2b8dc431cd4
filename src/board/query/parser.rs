//! Query tokenizer and parser.

use crate::board::domain::TaskPriority;

/// Due-date bucket filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueFilter {
    /// Due strictly before now.
    Overdue,
    /// Due between the start of today and seven days later, inclusive.
    Week,
}

/// Numeric comparison operator for estimate filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEqual,
    /// `=`
    Equal,
}

impl Comparison {
    /// Applies the comparison as `left <op> right`.
    #[must_use]
    pub const fn holds(self, left: u32, right: u32) -> bool {
        match self {
            Self::Less => left < right,
            Self::LessOrEqual => left <= right,
            Self::Greater => left > right,
            Self::GreaterOrEqual => left >= right,
            Self::Equal => left == right,
        }
    }
}

/// Estimate constraint such as `est:>=30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimateFilter {
    /// Operator.
    pub comparison: Comparison,
    /// Right-hand side in minutes.
    pub minutes: u32,
}

impl EstimateFilter {
    fn parse(value: &str) -> Option<Self> {
        // Two-character operators must be tried before their prefixes.
        const OPERATORS: [(&str, Comparison); 5] = [
            ("<=", Comparison::LessOrEqual),
            (">=", Comparison::GreaterOrEqual),
            ("<", Comparison::Less),
            (">", Comparison::Greater),
            ("=", Comparison::Equal),
        ];
        OPERATORS.iter().find_map(|(symbol, comparison)| {
            let number = value.strip_prefix(symbol)?;
            if number.is_empty() || !number.bytes().all(|byte| byte.is_ascii_digit()) {
                return None;
            }
            let minutes = number.parse().ok()?;
            Some(Self {
                comparison: *comparison,
                minutes,
            })
        })
    }
}

/// Structured form of a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardQuery {
    /// Required tags, lowercased.
    pub tags: Vec<String>,
    /// Required priority.
    pub priority: Option<TaskPriority>,
    /// Required due-date bucket.
    pub due: Option<DueFilter>,
    /// Estimate constraints, all of which must hold.
    pub estimates: Vec<EstimateFilter>,
    /// Lowercased substring required in title or description.
    pub text: Option<String>,
}

impl BoardQuery {
    /// Parses a query string. Tokens that do not form a valid filter are
    /// treated as free text, so parsing never fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use micro_kanban::board::domain::TaskPriority;
    /// use micro_kanban::board::query::BoardQuery;
    ///
    /// let query = BoardQuery::parse("p:high est:>=30 Riesgo semanal");
    /// assert_eq!(query.priority, Some(TaskPriority::High));
    /// assert_eq!(query.estimates.len(), 1);
    /// assert_eq!(query.text.as_deref(), Some("riesgo semanal"));
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut query = Self::default();
        let mut words: Vec<&str> = Vec::new();

        for token in input.split_whitespace() {
            if !query.apply_filter_token(token) {
                words.push(token);
            }
        }

        if !words.is_empty() {
            query.text = Some(words.join(" ").to_lowercase());
        }
        query
    }

    /// Returns `true` when the query places no constraint on tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Records a `key:value` filter token; returns `false` for free text.
    fn apply_filter_token(&mut self, token: &str) -> bool {
        let Some((key, value)) = token.split_once(':') else {
            return false;
        };
        if value.is_empty() {
            return false;
        }

        match key.to_ascii_lowercase().as_str() {
            "tag" => {
                self.tags.push(value.to_lowercase());
                true
            }
            "p" => TaskPriority::try_from(value)
                .map(|priority| self.priority = Some(priority))
                .is_ok(),
            "due" => match value.to_ascii_lowercase().as_str() {
                "overdue" => {
                    self.due = Some(DueFilter::Overdue);
                    true
                }
                "week" => {
                    self.due = Some(DueFilter::Week);
                    true
                }
                _ => false,
            },
            "est" => EstimateFilter::parse(value)
                .map(|estimate| self.estimates.push(estimate))
                .is_some(),
            _ => false,
        }
    }
}
