use std::io::{BufRead, Write};

use clap::ValueEnum;
use log::debug;
use serde::Serialize;

use crate::metric::Metric;
use crate::query::{points_within_radius, Neighbour, RadiusQuery};
use crate::session::prompt::{number, Console, SessionError};
use crate::store::PointStore;

/// Answer to the city prompt that ends the session.
pub const EXIT_TOKEN: &str = "0";

const CITY_PROMPT: &str =
    "Please enter selected city name (with line break after it), or enter '0' to exit:";
const CITY_NOT_FOUND: &str = "City not found in the city list";
const RADIUS_PROMPT: &str = "Please enter the wanted radius:";
const INVALID_INPUT: &str = "Invalid input";
const NORM_PROMPT: &str = "Please enter the wanted norm (0 - L2, Euclidean distance, 1 - Linf, Chebyshev distance, 2 - L1, Manhattan distance):";
const INVALID_NORM: &str = "Invalid norm";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct QueryReport<'a> {
    reference: &'a str,
    metric: Metric,
    radius: f64,
    count: usize,
    north_count: usize,
    cities: &'a [Neighbour],
}

pub struct Session<'a, R, W> {
    store: &'a PointStore,
    console: Console<R, W>,
    format: OutputFormat,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(store: &'a PointStore, input: R, output: W, format: OutputFormat) -> Self {
        Session {
            store,
            console: Console::new(input, output),
            format,
        }
    }

    pub fn into_output(self) -> W {
        self.console.into_output()
    }

    /// Runs queries until the exit token is entered. Returns how many
    /// queries were answered.
    pub fn run(&mut self) -> Result<usize, SessionError> {
        let mut answered = 0;
        loop {
            let city = self.ask_city()?;
            if city == EXIT_TOKEN {
                break;
            }
            let radius = self.ask_radius()?;
            let metric = self.ask_metric()?;

            let result = points_within_radius(self.store, &city, radius, metric)?;
            self.render(&city, radius, metric, &result)?;
            answered += 1;
        }

        writeln!(self.console.output(), "Bye")?;
        debug!("session finished after {} queries", answered);
        Ok(answered)
    }

    fn ask_city(&mut self) -> Result<String, SessionError> {
        let store = self.store;
        self.console.ask(
            CITY_PROMPT,
            CITY_NOT_FOUND,
            "a city name",
            |line| Some(line.to_string()),
            |city: String| (city == EXIT_TOKEN || store.contains(&city)).then_some(city),
        )
    }

    fn ask_radius(&mut self) -> Result<f64, SessionError> {
        self.console.ask_token(
            RADIUS_PROMPT,
            INVALID_INPUT,
            "a number",
            number::<f64>,
            |radius| (radius >= 0.0).then_some(radius),
        )
    }

    fn ask_metric(&mut self) -> Result<Metric, SessionError> {
        self.console.ask_token(
            NORM_PROMPT,
            INVALID_NORM,
            "an integer",
            number::<i64>,
            Metric::from_index,
        )
    }

    fn render(
        &mut self,
        reference: &str,
        radius: f64,
        metric: Metric,
        result: &RadiusQuery,
    ) -> Result<(), SessionError> {
        let format = self.format;
        let out = self.console.output();
        match format {
            OutputFormat::Text => {
                writeln!(out, "Search result:")?;
                writeln!(out, "{} city/cities found in the given radius.", result.len())?;
                writeln!(
                    out,
                    "{} cities are to the north of the selected city.",
                    result.north_count
                )?;
                writeln!(out, "City list:")?;
                for name in result.names() {
                    writeln!(out, "{}", name)?;
                }
            }
            OutputFormat::Json => {
                let report = QueryReport {
                    reference,
                    metric,
                    radius,
                    count: result.len(),
                    north_count: result.north_count,
                    cities: &result.neighbours,
                };
                serde_json::to_writer_pretty(&mut *out, &report)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    fn store() -> PointStore {
        PointStore::from_points([
            Point::new("A", 0.0, 0.0),
            Point::new("B", 3.0, 4.0),
            Point::new("C", 0.0, 5.0),
        ])
    }

    fn run(input: &str, format: OutputFormat) -> (Result<usize, SessionError>, String) {
        let store = store();
        let mut session = Session::new(&store, input.as_bytes(), Vec::new(), format);
        let res = session.run();
        let out = String::from_utf8(session.into_output()).unwrap();
        (res, out)
    }

    #[test]
    fn one_query_then_exit() {
        let (res, out) = run("A\n5\n0\n0\n", OutputFormat::Text);
        assert_eq!(res.unwrap(), 1);
        assert!(out.contains(
            "Search result:\n\
             2 city/cities found in the given radius.\n\
             1 cities are to the north of the selected city.\n\
             City list:\nB\nC\n"
        ));
        assert!(out.ends_with("Bye\n"));
    }

    #[test]
    fn validation_failures_reprompt() {
        let (res, out) = run("Nowhere\nA\n-3\n5\n7\n1\n0\n", OutputFormat::Text);
        assert_eq!(res.unwrap(), 1);
        assert!(out.contains("ERROR: City not found in the city list. Please try again.\n"));
        assert!(out.contains("ERROR: Invalid input. Please try again.\n"));
        assert!(out.contains("ERROR: Invalid norm. Please try again.\n"));
        assert!(out.contains("City list:\nB\nC\n"));
    }

    #[test]
    fn stray_blank_lines_before_numbers_are_ignored() {
        let (res, out) = run("A\n\n5\n\n  \n0\n0\n", OutputFormat::Text);
        assert_eq!(res.unwrap(), 1);
        assert!(out.contains("City list:\nB\nC\n"));
        assert!(!out.contains("ERROR:"));
        assert!(out.ends_with("Bye\n"));
    }

    #[test]
    fn non_numeric_radius_aborts() {
        let (res, out) = run("A\nfar\n", OutputFormat::Text);
        assert!(matches!(res, Err(SessionError::Input { .. })));
        assert!(!out.contains("Bye"));
    }

    #[test]
    fn end_of_input_aborts() {
        let (res, _) = run("A\n", OutputFormat::Text);
        assert!(matches!(res, Err(SessionError::EndOfInput { .. })));
    }

    #[test]
    fn json_report() {
        let (res, out) = run("A\n5\n0\n0\n", OutputFormat::Json);
        assert_eq!(res.unwrap(), 1);

        let start = out.find('{').unwrap();
        let end = out.rfind('}').unwrap();
        let report: serde_json::Value = serde_json::from_str(&out[start..=end]).unwrap();
        assert_eq!(report["reference"], "A");
        assert_eq!(report["metric"], "euclidean");
        assert_eq!(report["count"], 2);
        assert_eq!(report["north_count"], 1);
        assert_eq!(report["cities"][0]["name"], "B");
        assert_eq!(report["cities"][1]["name"], "C");
    }
}
