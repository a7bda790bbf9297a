use std::io::stdin;
use std::path::PathBuf;

use clap::Parser;
use youthwell::{
    breakdown, AssessmentReport, Catalog, ClassificationResult, Error, QuestionDefinition,
    Session, Tier, CATALOG,
};

/// Interactive stress self-assessment
#[derive(Parser)]
struct Args {
    /// Load questions and content from this JSON catalog instead of the built-in one
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Write the JSON report into this directory
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();

    let loaded;
    let catalog: &Catalog = match args.catalog {
        Some(ref path) => {
            loaded = Catalog::from_path(path)?;
            &loaded
        }
        None => &*CATALOG,
    };

    let mut buffer = String::new();
    let mut session = Session::new();

    println!("Please answer the following questions honestly.");
    for question in catalog.questions() {
        let progress = session.progress(catalog);
        println!("[{}/{}] {}", progress.answered + 1, progress.total, question.prompt);
        for (number, option) in question.options.iter().enumerate() {
            print!("  {} => {}", number + 1, option);
        }
        loop {
            println!();
            if stdin().read_line(&mut buffer)? == 0 {
                println!("Input closed before the assessment was complete.");
                return Ok(());
            }
            let answered = store_answer(buffer.trim(), question, &mut session, catalog);
            buffer.clear();
            match answered {
                Ok(()) => break,
                Err(_) => print!(
                    "Please answer with a number from 1 to {}.",
                    question.options.len()
                ),
            }
        }
        println!();
    }

    let result = session.submit(catalog)?.clone();
    render(&result, &session, catalog)?;

    if let Some(dir) = args.export {
        let path = AssessmentReport::now(&result, session.responses()).write_to_dir(dir)?;
        println!("Results saved to {}", path.display());
    }
    Ok(())
}

fn store_answer(
    value: &str,
    question: &QuestionDefinition,
    session: &mut Session,
    catalog: &Catalog,
) -> Result<(), Error> {
    let label = value
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|index| question.options.get(index))
        .ok_or_else(|| Error::UnknownOption {
            question: question.id.clone(),
            option: value.to_string(),
        })?;
    session.answer(catalog, &question.id, label)?;
    Ok(())
}

fn render(
    result: &ClassificationResult,
    session: &Session,
    catalog: &Catalog,
) -> Result<(), Error> {
    println!("{}", result.label);
    println!("Stress level: {:.1}%", result.percentage);
    println!();

    println!("Category breakdown");
    for (category, weight) in breakdown(session.responses(), catalog) {
        println!("  {:<10} {}", category, "#".repeat(weight.into()));
    }

    if !result.insights.is_empty() {
        println!();
        println!("Personal insights");
        for insight in &result.insights {
            println!("  - {}", insight);
        }
    }

    let bundle = catalog.content_bundle(result.tier)?;
    println!();
    println!("Recommended exercises");
    for exercise in &bundle.exercises {
        println!("  - {}", exercise);
    }

    println!();
    println!("Wisdom from the Bhagavad Gita");
    for quote in &bundle.quotes {
        println!("  {}", quote.attribution);
        println!("    {}", quote.source);
        println!("    {}", quote.translation);
        println!("    Relevance: {}", quote.relevance);
    }

    for recommendation in catalog.recommendations() {
        println!();
        println!("{}", recommendation.title);
        for tip in &recommendation.tips {
            println!("  - {}", tip);
        }
    }

    if result.tier == Tier::High && !bundle.emergency_resources.is_empty() {
        println!();
        println!("If you're experiencing severe distress, please reach out for immediate help:");
        for resource in &bundle.emergency_resources {
            println!("  - {}", resource);
        }
    }
    Ok(())
}
