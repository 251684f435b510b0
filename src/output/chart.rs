//! Bar charts of link status and keyword frequency
//!
//! A [`BarChart`] holds the bars, titles and callouts of one chart. Rendering
//! goes through plotly, which emits a standalone HTML page.

use crate::crawler::{LinkRecord, SeedTally};
use crate::output::OutputResult;
use plotly::common::{Marker, Orientation as PlotOrientation, Title};
use plotly::layout::{Annotation, Axis};
use plotly::{Layout, Plot};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Direction the bars grow in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Categories on the x axis, values grow upwards
    Vertical,
    /// Categories on the y axis, values grow to the right
    Horizontal,
}

/// Fill color of a bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarColor {
    Default,
    Red,
    Green,
    Blue,
}

impl BarColor {
    fn css(&self) -> &'static str {
        match self {
            Self::Default => "#636efa",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

/// A single bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub value: u64,
    pub color: BarColor,
}

/// A note pointing at one bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callout {
    pub text: String,
    /// Label of the bar the note points at
    pub label: String,
    pub value: u64,
}

/// A titled bar chart with optional callouts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub orientation: Orientation,
    pub bars: Vec<Bar>,
    pub callouts: Vec<Callout>,
}

impl BarChart {
    /// Total / Valid / Invalid link counts
    pub fn link_status(records: &[LinkRecord]) -> Self {
        let total = records.len() as u64;
        let valid = records.iter().filter(|r| r.status.is_valid()).count() as u64;
        let invalid = total - valid;

        let bars = [("Total", total), ("Valid", valid), ("Invalid", invalid)]
            .into_iter()
            .map(|(label, value)| Bar {
                label: label.to_string(),
                value,
                color: BarColor::Default,
            })
            .collect();

        Self {
            title: "Link Status Statistics".to_string(),
            x_title: "Link Status".to_string(),
            y_title: "Number of Links".to_string(),
            orientation: Orientation::Vertical,
            bars,
            callouts: Vec::new(),
        }
    }

    /// Keyword frequency per seed, highest first
    ///
    /// The highest bar is red, the lowest green and the rest blue. Seeds with
    /// equal totals keep their crawl order.
    pub fn keyword_frequency(tallies: &[SeedTally]) -> Self {
        let mut totals: Vec<(&str, u64)> = tallies
            .iter()
            .map(|seed| (seed.seed.as_str(), seed.tally.total()))
            .collect();
        totals.sort_by(|a, b| b.1.cmp(&a.1));

        let last = totals.len().saturating_sub(1);
        let bars: Vec<Bar> = totals
            .iter()
            .enumerate()
            .map(|(index, (seed, total))| Bar {
                label: seed.to_string(),
                value: *total,
                color: if index == 0 {
                    BarColor::Red
                } else if index == last {
                    BarColor::Green
                } else {
                    BarColor::Blue
                },
            })
            .collect();

        let mut callouts = Vec::new();
        if let (Some(highest), Some(lowest)) = (bars.first(), bars.last()) {
            callouts.push(Callout {
                text: format!("Highest: {}", highest.label),
                label: highest.label.clone(),
                value: highest.value,
            });
            callouts.push(Callout {
                text: format!("Lowest: {}", lowest.label),
                label: lowest.label.clone(),
                value: lowest.value,
            });
        }

        Self {
            title: "Keyword Frequency in Valid Links".to_string(),
            x_title: "Keyword Frequency".to_string(),
            y_title: "URLs".to_string(),
            orientation: Orientation::Horizontal,
            bars,
            callouts,
        }
    }

    /// Builds the plotly figure for this chart
    pub fn to_plot(&self) -> Plot {
        let labels: Vec<String> = self.bars.iter().map(|bar| bar.label.clone()).collect();
        let values: Vec<u64> = self.bars.iter().map(|bar| bar.value).collect();
        let colors: Vec<&'static str> = self.bars.iter().map(|bar| bar.color.css()).collect();
        let marker = Marker::new().color_array(colors);

        let mut plot = Plot::new();
        match self.orientation {
            Orientation::Vertical => {
                plot.add_trace(plotly::Bar::new(labels, values).marker(marker));
            }
            Orientation::Horizontal => {
                plot.add_trace(
                    plotly::Bar::new(values, labels)
                        .orientation(PlotOrientation::Horizontal)
                        .marker(marker),
                );
            }
        }

        let mut annotations: Vec<Annotation> = self
            .callouts
            .iter()
            .map(|callout| {
                let annotation = Annotation::new().text(callout.text.as_str()).show_arrow(true);
                match self.orientation {
                    Orientation::Vertical => annotation
                        .x(callout.label.clone())
                        .y(callout.value as f64),
                    Orientation::Horizontal => annotation
                        .x(callout.value as f64)
                        .y(callout.label.clone()),
                }
            })
            .collect();
        if self.bars.is_empty() {
            annotations.push(Annotation::new().text("No data").show_arrow(false));
        }

        plot.set_layout(
            Layout::new()
                .title(Title::from(self.title.as_str()))
                .x_axis(Axis::new().title(Title::from(self.x_title.as_str())))
                .y_axis(Axis::new().title(Title::from(self.y_title.as_str())))
                .annotations(annotations),
        );
        plot
    }

    /// Renders the chart as a complete HTML document
    pub fn render_html(&self) -> String {
        self.to_plot().to_html()
    }
}

/// Writes the chart as an HTML file
pub fn write_chart(chart: &BarChart, path: &Path) -> OutputResult<()> {
    let mut file = File::create(path)?;
    file.write_all(chart.render_html().as_bytes())?;
    tracing::debug!("Chart '{}' saved to {}", chart.title, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::{KeywordGroup, KeywordTally};

    fn seed(url: &str, hits: u64) -> SeedTally {
        let mut tally = KeywordTally::new();
        tally.add(KeywordGroup::new(["OFAC"]), hits);
        SeedTally {
            seed: url.to_string(),
            tally,
        }
    }

    #[test]
    fn test_link_status_counts() {
        let records = vec![
            LinkRecord::new("s", "a", Some(200)),
            LinkRecord::new("s", "b", Some(200)),
            LinkRecord::new("s", "c", Some(404)),
            LinkRecord::new("s", "d", None),
        ];

        let chart = BarChart::link_status(&records);
        let values: Vec<(&str, u64)> = chart
            .bars
            .iter()
            .map(|bar| (bar.label.as_str(), bar.value))
            .collect();
        assert_eq!(values, vec![("Total", 4), ("Valid", 2), ("Invalid", 2)]);
        assert_eq!(chart.orientation, Orientation::Vertical);
        assert!(chart.callouts.is_empty());
    }

    #[test]
    fn test_keyword_frequency_sorted_and_colored() {
        let tallies = vec![
            seed("https://low.example/", 1),
            seed("https://high.example/", 9),
            seed("https://mid.example/", 4),
        ];

        let chart = BarChart::keyword_frequency(&tallies);
        let labels: Vec<&str> = chart.bars.iter().map(|bar| bar.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "https://high.example/",
                "https://mid.example/",
                "https://low.example/"
            ]
        );
        assert_eq!(chart.bars[0].color, BarColor::Red);
        assert_eq!(chart.bars[1].color, BarColor::Blue);
        assert_eq!(chart.bars[2].color, BarColor::Green);
    }

    #[test]
    fn test_keyword_frequency_callouts() {
        let tallies = vec![
            seed("https://low.example/", 1),
            seed("https://high.example/", 9),
        ];

        let chart = BarChart::keyword_frequency(&tallies);
        assert_eq!(
            chart.callouts,
            vec![
                Callout {
                    text: "Highest: https://high.example/".to_string(),
                    label: "https://high.example/".to_string(),
                    value: 9,
                },
                Callout {
                    text: "Lowest: https://low.example/".to_string(),
                    label: "https://low.example/".to_string(),
                    value: 1,
                },
            ]
        );
    }

    #[test]
    fn test_keyword_frequency_ties_keep_crawl_order() {
        let tallies = vec![
            seed("https://first.example/", 2),
            seed("https://second.example/", 2),
        ];
        let chart = BarChart::keyword_frequency(&tallies);
        assert_eq!(chart.bars[0].label, "https://first.example/");
    }

    #[test]
    fn test_single_seed_is_highest() {
        let chart = BarChart::keyword_frequency(&[seed("https://only.example/", 3)]);
        assert_eq!(chart.bars.len(), 1);
        assert_eq!(chart.bars[0].color, BarColor::Red);
    }

    #[test]
    fn test_empty_chart_renders_no_data() {
        let chart = BarChart::keyword_frequency(&[]);
        assert!(chart.bars.is_empty());
        assert!(chart.callouts.is_empty());

        let html = chart.render_html();
        assert!(html.contains("No data"));
        assert!(html.contains("Keyword Frequency in Valid Links"));
    }

    #[test]
    fn test_render_html_contains_titles() {
        let chart = BarChart::link_status(&[LinkRecord::new("s", "a", Some(200))]);
        let html = chart.render_html();

        assert!(html.contains("<html"));
        assert!(html.contains("Link Status Statistics"));
        assert!(html.contains("Number of Links"));
    }

    #[test]
    fn test_write_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.html");
        write_chart(&BarChart::link_status(&[]), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Link Status Statistics"));
    }
}
