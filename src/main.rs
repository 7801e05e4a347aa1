//! Command-line front end: load tables, plan, print the timetable.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use u_curriculum::catalog::{load_course_table, load_requirement_table, prepare_catalog};
use u_curriculum::config::PlannerConfig;
use u_curriculum::models::{
    english_elective_name, BreadthCategory, EnglishLevel, ExtraDepartment, ScienceTrack, Settings,
    Timetable, SEMESTER_COUNT,
};
use u_curriculum::scheduler::{CourseScheduler, ProgressReport, ScheduleRequest};
use u_curriculum::validation::{validate_catalog, validate_settings};
use u_curriculum::{logging, PlannerError};

#[derive(Parser, Debug)]
#[command(author, version, about = "Course timetable planner: builds an eight-semester plan")]
struct Args {
    /// Raw course table (CSV)
    #[arg(long, default_value = "data/all_done.csv")]
    courses: PathBuf,
    /// Requirement table (CSV)
    #[arg(long, default_value = "data/cslearn.csv")]
    requirements: PathBuf,
    /// JSON configuration (settings and quotas)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Credit cap of each of the eight semesters
    #[arg(long, num_args = SEMESTER_COUNT, value_name = "C")]
    credits: Option<Vec<u32>>,
    /// Extra departments (1: mathematics, 2: physics)
    #[arg(long = "extra-dept", num_args = 0.., value_parser = parse_extra_department)]
    extra_dept: Vec<ExtraDepartment>,
    /// Basic-science track (X: physics, Y: chemistry, Z: life science)
    #[arg(long = "select-course", value_parser = parse_track)]
    select_course: Option<ScienceTrack>,
    /// Breadth category to avoid (A-D)
    #[arg(long = "avoid-type", value_parser = parse_breadth)]
    avoid_type: Option<BreadthCategory>,
    /// Two English elective codes (1-10, default 1 2)
    #[arg(long = "eng-type", num_args = 2, value_name = "CODE")]
    eng_type: Option<Vec<String>>,
    /// English proficiency (Exempt, Elementary, Intermediate, Advanced)
    #[arg(long = "english-level", value_parser = parse_english_level)]
    english_level: Option<EnglishLevel>,
    /// Courses to place first
    #[arg(long, num_args = 1..)]
    want: Vec<String>,
    /// Courses to exclude
    #[arg(long, num_args = 1..)]
    unwant: Vec<String>,
    /// Semesters already completed
    #[arg(long = "completed-semesters")]
    completed_semesters: Option<usize>,
    /// Courses already completed
    #[arg(long, num_args = 1..)]
    completed: Vec<String>,
    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn parse_extra_department(s: &str) -> Result<ExtraDepartment, String> {
    ExtraDepartment::from_code(s).ok_or_else(|| format!("unknown department code '{s}' (1 or 2)"))
}

fn parse_track(s: &str) -> Result<ScienceTrack, String> {
    ScienceTrack::from_code(s).ok_or_else(|| format!("unknown track '{s}' (X, Y or Z)"))
}

fn parse_breadth(s: &str) -> Result<BreadthCategory, String> {
    BreadthCategory::from_code(s).ok_or_else(|| format!("unknown breadth category '{s}' (A-D)"))
}

fn parse_english_level(s: &str) -> Result<EnglishLevel, String> {
    EnglishLevel::from_name(s).ok_or_else(|| format!("unknown English level '{s}'"))
}

impl Args {
    /// Overrides configuration values with the flags that were given.
    fn apply(&self, settings: &mut Settings) -> anyhow::Result<()> {
        if let Some(credits) = &self.credits {
            for (cap, &value) in settings.credit_caps.iter_mut().zip(credits) {
                *cap = value;
            }
        }
        if !self.extra_dept.is_empty() {
            settings.extra_departments = self.extra_dept.clone();
        }
        if let Some(track) = self.select_course {
            settings.track = track;
        }
        if let Some(avoid) = self.avoid_type {
            settings.avoided_breadth = avoid;
        }
        if let Some(codes) = &self.eng_type {
            let mut names = Vec::with_capacity(codes.len());
            for code in codes {
                let Some(name) = english_elective_name(code) else {
                    bail!("unknown English elective code '{code}' (1-10)");
                };
                names.push(name.to_string());
            }
            settings.english_electives = names;
        }
        settings.fill_default_english_electives();
        if let Some(level) = self.english_level {
            settings.english_level = level;
        }
        if !self.want.is_empty() {
            settings.wanted_courses = self.want.clone();
        }
        if !self.unwant.is_empty() {
            settings.unwanted_courses = self.unwant.clone();
        }
        if let Some(n) = self.completed_semesters {
            settings.completed_semesters = n;
        }
        if !self.completed.is_empty() {
            settings.completed_courses = self.completed.clone();
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct Output<'a> {
    settings: &'a Settings,
    timetable: &'a Timetable,
    progress: &'a ProgressReport,
}

fn print_tables(settings: &Settings, timetable: &Timetable, progress: &ProgressReport) {
    println!("Settings: {settings:?}");
    println!();
    println!("==================== Recommended timetable ====================");
    println!("Total credits: {}", timetable.total_credits);
    if timetable.carried_credits > 0 {
        println!("  (including {} completed credits)", timetable.carried_credits);
    }
    println!();

    for semester in &timetable.semesters {
        println!("--- {} ({} credits) ---", semester.label(), semester.credits);
        if semester.courses.is_empty() {
            println!("No courses this semester.");
        } else {
            println!("{:<16} {:<24} {:>4}  教師", "科號", "中文課名", "學分");
            for course in &semester.courses {
                println!(
                    "{:<16} {:<24} {:>4}  {}",
                    course.code, course.name, course.credits, course.instructor
                );
            }
        }
        println!();
    }

    println!(
        "GE credits: {} | elective credits: {} | remaining to graduate: {}",
        timetable.ge_credits, timetable.elective_credits, progress.remaining_credits
    );
    if !timetable.unmet_requirements.is_empty() {
        println!("Unmet requirements: {}", timetable.unmet_requirements.join(", "));
    }
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PlannerConfig::from_json_file(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => PlannerConfig::default(),
    };
    args.apply(&mut config.settings)?;

    if let Err(errors) = validate_settings(&config.settings, &config.quotas) {
        return Err(PlannerError::InvalidSettings(errors).into());
    }

    let records = load_course_table(&args.courses).context("loading course table")?;
    let requirements = load_requirement_table(&args.requirements).context("loading requirement table")?;

    let catalog = prepare_catalog(&records, &config.settings);
    if let Err(issues) = validate_catalog(&catalog.courses) {
        for issue in &issues {
            warn!(kind = ?issue.kind, "{}", issue.message);
        }
    }
    info!(
        courses = catalog.courses.len(),
        breadth = ?catalog.breadth_picks,
        "catalog ready"
    );

    let scheduler = CourseScheduler::new().with_quotas(config.quotas);
    let request = ScheduleRequest::new(catalog, requirements, config.settings);
    let timetable = scheduler.schedule(&request);
    let progress = ProgressReport::calculate(&timetable, scheduler.quotas());

    if args.json {
        let output = Output {
            settings: &request.settings,
            timetable: &timetable,
            progress: &progress,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_tables(&request.settings, &timetable, &progress);
    }
    Ok(())
}
