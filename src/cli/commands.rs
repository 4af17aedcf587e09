//! Command implementations for the diachron CLI.

use std::time::Instant;

use serde::Serialize;
use serde_json::Value;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::filter::FilteringCriteria;

/// Execute a CLI command.
pub fn execute_command(args: DiachronArgs) -> Result<()> {
    let config = args.corpus.to_config()?;

    let start_time = Instant::now();
    let corpus = Corpus::load(&config)?;
    log::info!("Corpus loaded in {:?}", start_time.elapsed());

    let criteria = corpus.criteria(args.filter.authors_filter.as_deref(), args.filter.date.as_deref())?;
    log::debug!("Filtering criteria: {criteria:?}");

    let (message, result) = run_query(&corpus, &criteria, &args.command)?;
    output_result(&message, &result, &args)
}

/// Answer one subcommand against a loaded corpus.
///
/// Returns the heading used by human output together with the result.
pub fn run_query(
    corpus: &Corpus,
    criteria: &FilteringCriteria,
    command: &Command,
) -> Result<(String, Value)> {
    match command {
        Command::Stats => answer("Corpus statistics".to_string(), corpus.stats(criteria)),
        Command::Lemma(word) => answer(
            format!("Occurrences of lemma {}", word.word),
            corpus.count_lemma(criteria, &word.word),
        ),
        Command::Form(word) => answer(
            format!("Occurrences of form {}", word.word),
            corpus.count_form(criteria, &word.word),
        ),
        Command::OccurrencesLemma(word) => answer(
            format!("Lines attesting lemma {}", word.word),
            corpus.occurrences_lemma(criteria, &word.word),
        ),
        Command::OccurrencesForm(word) => answer(
            format!("Lines attesting form {}", word.word),
            corpus.occurrences_form(criteria, &word.word),
        ),
        Command::Intersection(intersection) => answer(
            format!("Lemmas exclusive to {}", intersection.targets.join(", ")),
            corpus.exclusive_intersection(criteria, &intersection.targets),
        ),
        Command::Ambiguous => answer("Ambiguous forms".to_string(), corpus.ambiguous_forms(criteria)),
    }
}

fn answer<T: Serialize>(message: String, result: T) -> Result<(String, Value)> {
    Ok((message, serde_json::to_value(result)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn corpus_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        for (author, text) in [
            ("Caesar", "Gallia est omnis divisa\n"),
            ("Cicero", "bellum est\n"),
            ("Sallustius", "bellum\n"),
        ] {
            fs::create_dir_all(dir.path().join("texts").join(author)).unwrap();
            fs::write(dir.path().join("texts").join(author).join("opus.txt"), text).unwrap();
        }
        fs::write(
            dir.path().join("lemmas.csv"),
            "est,V,sum\nbellum,N,bellum\ngallia,N,gallia\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("authors.txt"),
            "Caesar # (1a)\nCicero # (1a)\nSallustius # (1a)\n",
        )
        .unwrap();
        dir
    }

    fn parse(dir: &TempDir, command: &[&str]) -> DiachronArgs {
        let data_dir = dir.path().join("texts");
        let lemmas = dir.path().join("lemmas.csv");
        let authors = dir.path().join("authors.txt");
        let mut argv = vec![
            "diachron".to_string(),
            "--data-dir".to_string(),
            data_dir.display().to_string(),
            "--lemmas".to_string(),
            lemmas.display().to_string(),
            "--authors".to_string(),
            authors.display().to_string(),
        ];
        argv.extend(command.iter().map(|s| s.to_string()));
        DiachronArgs::try_parse_from(argv).unwrap()
    }

    fn run(args: &DiachronArgs) -> Value {
        let corpus = Corpus::load(&args.corpus.to_config().unwrap()).unwrap();
        let criteria = corpus
            .criteria(args.filter.authors_filter.as_deref(), args.filter.date.as_deref())
            .unwrap();
        run_query(&corpus, &criteria, &args.command).unwrap().1
    }

    #[test]
    fn test_intersection_dispatch() {
        let dir = corpus_dir();

        let args = parse(&dir, &["intersection", "Caesar,Cicero"]);
        assert_eq!(run(&args), json!(["sum"]));

        let args = parse(&dir, &["intersection", "Cicero,Sallustius"]);
        assert_eq!(run(&args), json!(["bellum"]));

        let args = parse(&dir, &["intersection", "Cicero"]);
        assert_eq!(run(&args), json!([]));

        // With Sallustius filtered out, bellum belongs to Cicero alone
        let args = parse(
            &dir,
            &["intersection", "Cicero", "--authors-filter", "Caesar,Cicero"],
        );
        assert_eq!(run(&args), json!(["bellum"]));
    }

    #[test]
    fn test_lemma_and_stats_dispatch() {
        let dir = corpus_dir();

        let lemma = run(&parse(&dir, &["lemma", "bellum"]));
        assert_eq!(lemma["total"], 2);
        assert_eq!(lemma["forms"]["bellum"], 2);

        let stats = run(&parse(&dir, &["stats"]));
        assert_eq!(stats["headwords"], 4);
        assert_eq!(stats["entities"], 7);
    }

    #[test]
    fn test_execute_command_reports_bad_date() {
        let dir = corpus_dir();
        let args = parse(&dir, &["stats", "--date", "soon"]);
        assert!(execute_command(args).is_err());
    }
}
