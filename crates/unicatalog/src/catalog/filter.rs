//! Typed predicate construction for the filtered university listing.
//!
//! A [`FilterQuery`] is an ordered list of clauses, each carrying its bound
//! value. Stores decide how to run it: the MySQL store renders it into a
//! parameterized statement, the in-memory store evaluates it per record.

use std::cmp::Ordering;

use super::domain::{FilterCriteria, University};
use super::validation::{parse_number, ValidationError};

/// Sentinel meaning "any country".
pub const ALL_COUNTRIES: &str = "All Countries";
/// Sentinel meaning "any degree level".
pub const ALL_DEGREES: &str = "All Degrees";

/// Maps display synonyms onto the stored degree labels.
pub fn normalize_degree_level(raw: &str) -> &str {
    match raw {
        "Bachelor's" => "Bachelor",
        "Master's" => "Master",
        other => other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    AtLeast,
    AtMost,
}

impl Comparison {
    pub fn sql_operator(self) -> &'static str {
        match self {
            Comparison::Equal => "=",
            Comparison::AtLeast => ">=",
            Comparison::AtMost => "<=",
        }
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Comparison::Equal => ordering == Ordering::Equal,
            Comparison::AtLeast => ordering != Ordering::Less,
            Comparison::AtMost => ordering != Ordering::Greater,
        }
    }
}

/// Value bound to a clause placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Number(f64),
}

/// One conjunct of the listing predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    Country(String),
    DegreeLevel(String),
    MinTuition(f64),
    MaxTuition(f64),
    /// The record's GPA requirement is within what the user has.
    GpaEligible(f64),
    IeltsEligible(f64),
}

impl FilterClause {
    pub fn column(&self) -> &'static str {
        match self {
            FilterClause::Country(_) => "country",
            FilterClause::DegreeLevel(_) => "degree_level",
            FilterClause::MinTuition(_) | FilterClause::MaxTuition(_) => "tuition_fee",
            FilterClause::GpaEligible(_) => "required_gpa",
            FilterClause::IeltsEligible(_) => "required_ielts",
        }
    }

    pub fn comparison(&self) -> Comparison {
        match self {
            FilterClause::Country(_) | FilterClause::DegreeLevel(_) => Comparison::Equal,
            FilterClause::MinTuition(_) => Comparison::AtLeast,
            FilterClause::MaxTuition(_)
            | FilterClause::GpaEligible(_)
            | FilterClause::IeltsEligible(_) => Comparison::AtMost,
        }
    }

    pub fn value(&self) -> FilterValue {
        match self {
            FilterClause::Country(text) | FilterClause::DegreeLevel(text) => {
                FilterValue::Text(text.clone())
            }
            FilterClause::MinTuition(number)
            | FilterClause::MaxTuition(number)
            | FilterClause::GpaEligible(number)
            | FilterClause::IeltsEligible(number) => FilterValue::Number(*number),
        }
    }

    /// Evaluates the clause the way the SQL comparison would.
    pub fn matches(&self, university: &University) -> bool {
        let ordering = match self {
            FilterClause::Country(country) => {
                Some(university.country.as_str().cmp(country.as_str()))
            }
            FilterClause::DegreeLevel(level) => {
                Some(university.degree_level.as_str().cmp(level.as_str()))
            }
            FilterClause::MinTuition(bound) | FilterClause::MaxTuition(bound) => {
                university.tuition_fee.partial_cmp(bound)
            }
            FilterClause::GpaEligible(bound) => university.required_gpa.partial_cmp(bound),
            FilterClause::IeltsEligible(bound) => university.required_ielts.partial_cmp(bound),
        };

        ordering.is_some_and(|ordering| self.comparison().accepts(ordering))
    }
}

/// Conjunction of clauses plus the fixed ranking order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterQuery {
    clauses: Vec<FilterClause>,
}

impl FilterQuery {
    /// Builds the predicate from raw criteria.
    ///
    /// Text criteria are compared as given unless they are the sentinel, so
    /// an empty country matches nothing. Blank numeric criteria add no
    /// clause. Clause order is fixed: country, degree level, fee bounds,
    /// then eligibility.
    pub fn from_criteria(criteria: &FilterCriteria) -> Result<Self, ValidationError> {
        let mut clauses = Vec::new();

        if let Some(country) = criteria.country.as_deref() {
            if country != ALL_COUNTRIES {
                clauses.push(FilterClause::Country(country.to_string()));
            }
        }

        if let Some(level) = criteria.degree_level.as_deref() {
            if level != ALL_DEGREES {
                clauses.push(FilterClause::DegreeLevel(
                    normalize_degree_level(level).to_string(),
                ));
            }
        }

        if let Some(fee) = parse_number("min_fee", criteria.min_fee.as_deref())? {
            clauses.push(FilterClause::MinTuition(fee));
        }
        if let Some(fee) = parse_number("max_fee", criteria.max_fee.as_deref())? {
            clauses.push(FilterClause::MaxTuition(fee));
        }
        if let Some(gpa) = parse_number("user_gpa", criteria.user_gpa.as_deref())? {
            clauses.push(FilterClause::GpaEligible(gpa));
        }
        if let Some(ielts) = parse_number("user_ielts", criteria.user_ielts.as_deref())? {
            clauses.push(FilterClause::IeltsEligible(ielts));
        }

        Ok(Self { clauses })
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn is_unconstrained(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Bound parameters in placeholder order.
    pub fn params(&self) -> Vec<FilterValue> {
        self.clauses.iter().map(FilterClause::value).collect()
    }

    pub fn matches(&self, university: &University) -> bool {
        self.clauses.iter().all(|clause| clause.matches(university))
    }

    /// Ranking ascending, id as the tie-break.
    pub fn listing_order(left: &University, right: &University) -> Ordering {
        left.ranking
            .cmp(&right.ranking)
            .then_with(|| left.id.cmp(&right.id))
    }
}
