//! The fixed analysis catalog and the selection dispatcher.
//!
//! [`Analysis`] is a closed menu: every variant owns its display name, its
//! chart labels and the recipe that computes it. [`run_selection`] runs the
//! user's picks in order and collects one [`Report`] per pick.

use std::{fmt, str::FromStr};

use itertools::Itertools;
use log::{debug, info, warn};
use serde::{Serialize, Serializer};

use crate::{
    dataset::{self, CleanedDataset},
    error::AnalysisError,
    loader::RawTable,
    recipes,
    result::AnalysisResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Analysis {
    TypeCounts,
    VotesByType,
    MaxVotes,
    OnlineOrderCounts,
    RatingDistribution,
    RatingByOnlineOrder,
    TypeByOnlineOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartLabels {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

type Recipe = fn(&CleanedDataset) -> Result<AnalysisResult, AnalysisError>;

impl Analysis {
    pub const ALL: [Analysis; 7] = [
        Analysis::TypeCounts,
        Analysis::VotesByType,
        Analysis::MaxVotes,
        Analysis::OnlineOrderCounts,
        Analysis::RatingDistribution,
        Analysis::RatingByOnlineOrder,
        Analysis::TypeByOnlineOrder,
    ];

    /// Short identifier accepted on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Analysis::TypeCounts => "type-counts",
            Analysis::VotesByType => "votes-by-type",
            Analysis::MaxVotes => "max-votes",
            Analysis::OnlineOrderCounts => "online-order-counts",
            Analysis::RatingDistribution => "rating-distribution",
            Analysis::RatingByOnlineOrder => "rating-by-online-order",
            Analysis::TypeByOnlineOrder => "type-by-online-order",
        }
    }

    /// Menu label shown to the user.
    pub fn display_name(self) -> &'static str {
        match self {
            Analysis::TypeCounts => "Explore listed_in (type) column",
            Analysis::VotesByType => "Preferred by a larger number of individuals",
            Analysis::MaxVotes => "Restaurant with maximum votes",
            Analysis::OnlineOrderCounts => "Explore online_order column",
            Analysis::RatingDistribution => "Explore ratings",
            Analysis::RatingByOnlineOrder => "Compare online and offline order ratings",
            Analysis::TypeByOnlineOrder => "Heatmap of listed_in(type) and online_order",
        }
    }

    pub fn subheading(self) -> &'static str {
        match self {
            Analysis::TypeCounts => "Explore by Type of Restaurant",
            Analysis::VotesByType => "Preferred by a Larger Number of Individuals",
            Analysis::MaxVotes => "Restaurant with Maximum Votes",
            Analysis::OnlineOrderCounts => "Explore Online Orders",
            Analysis::RatingDistribution => "Explore by Ratings",
            Analysis::RatingByOnlineOrder => "Compare Online and Offline Order Ratings",
            Analysis::TypeByOnlineOrder => "Heatmap of Listed In (Type) and Online Order",
        }
    }

    pub fn labels(self) -> ChartLabels {
        let (title, x_label, y_label) = match self {
            Analysis::TypeCounts => ("Number of Restaurants by Type", "Type of restaurant", "Count"),
            Analysis::VotesByType => ("Total Votes by Restaurant Type", "Type of restaurant", "Votes"),
            Analysis::MaxVotes => ("Restaurant(s) with the maximum votes", "Name", "Votes"),
            Analysis::OnlineOrderCounts => (
                "Number of Restaurants with Online Orders",
                "Online Order",
                "Count",
            ),
            Analysis::RatingDistribution => ("Distribution of Ratings", "Rating", "Frequency"),
            Analysis::RatingByOnlineOrder => ("Ratings by Online Order", "Online Order", "Rating"),
            Analysis::TypeByOnlineOrder => (
                "Heatmap of Restaurant Types and Online Orders",
                "Online Order",
                "Listed In (Type)",
            ),
        };
        ChartLabels {
            title,
            x_label,
            y_label,
        }
    }

    fn recipe(self) -> Recipe {
        match self {
            Analysis::TypeCounts => recipes::type_counts,
            Analysis::VotesByType => recipes::votes_by_type,
            Analysis::MaxVotes => recipes::max_votes,
            Analysis::OnlineOrderCounts => recipes::online_order_counts,
            Analysis::RatingDistribution => recipes::rating_distribution,
            Analysis::RatingByOnlineOrder => recipes::rating_by_online_order,
            Analysis::TypeByOnlineOrder => recipes::type_by_online_order,
        }
    }

    pub fn run(self, dataset: &CleanedDataset) -> Result<AnalysisResult, AnalysisError> {
        (self.recipe())(dataset)
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Analysis {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Analysis::ALL
            .into_iter()
            .find(|analysis| {
                analysis.id().eq_ignore_ascii_case(wanted)
                    || analysis.display_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| {
                format!(
                    "Unknown analysis '{wanted}'. Expected one of: {}",
                    Analysis::ALL.iter().map(|a| a.id()).join(", ")
                )
            })
    }
}

impl Serialize for Analysis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub analysis: Analysis,
    pub outcome: Result<AnalysisResult, AnalysisError>,
}

/// Drops repeated picks, keeping the first occurrence of each.
pub fn normalize_selection(selection: &[Analysis]) -> Vec<Analysis> {
    selection.iter().copied().unique().collect()
}

/// Runs every selected analysis against an already cleaned dataset.
pub fn run_on_dataset(dataset: &CleanedDataset, selection: &[Analysis]) -> Vec<Report> {
    normalize_selection(selection)
        .into_iter()
        .map(|analysis| {
            let outcome = analysis.run(dataset);
            log_outcome(analysis, &outcome);
            Report { analysis, outcome }
        })
        .collect()
}

/// Cleans `table` and runs the selection against it.
///
/// A file without data rows reports an empty result for every pick. A file
/// whose rating column is missing reports that column for every pick.
pub fn run_selection(table: &RawTable, selection: &[Analysis]) -> Vec<Report> {
    let selection = normalize_selection(selection);
    if selection.is_empty() {
        return Vec::new();
    }
    if table.is_empty() {
        info!("Uploaded file has no data rows");
        return selection
            .into_iter()
            .map(|analysis| Report {
                analysis,
                outcome: Err(AnalysisError::EmptyResult),
            })
            .collect();
    }
    match dataset::clean(table) {
        Ok(cleaned) => run_on_dataset(&cleaned, &selection),
        Err(err) => {
            warn!("Unable to clean dataset: {err}");
            selection
                .into_iter()
                .map(|analysis| Report {
                    analysis,
                    outcome: Err(err.clone()),
                })
                .collect()
        }
    }
}

fn log_outcome(analysis: Analysis, outcome: &Result<AnalysisResult, AnalysisError>) {
    match outcome {
        Ok(result) => debug!("{} produced a {} result", analysis.id(), result.kind()),
        Err(err) if err.is_informational() => info!("{}: {err}", analysis.id()),
        Err(err) => warn!("{}: {err}", analysis.id()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_and_display_names() {
        assert_eq!("max-votes".parse::<Analysis>(), Ok(Analysis::MaxVotes));
        assert_eq!(
            "explore RATINGS".parse::<Analysis>(),
            Ok(Analysis::RatingDistribution)
        );
        let err = "pie-chart".parse::<Analysis>().unwrap_err();
        assert!(err.contains("type-by-online-order"));
    }

    #[test]
    fn ids_and_names_are_unique() {
        assert_eq!(Analysis::ALL.iter().map(|a| a.id()).unique().count(), 7);
        assert_eq!(
            Analysis::ALL.iter().map(|a| a.display_name()).unique().count(),
            7
        );
    }

    #[test]
    fn selection_keeps_first_occurrence_order() {
        let picks = [
            Analysis::MaxVotes,
            Analysis::TypeCounts,
            Analysis::MaxVotes,
        ];
        assert_eq!(
            normalize_selection(&picks),
            vec![Analysis::MaxVotes, Analysis::TypeCounts]
        );
    }
}
