//! CSV tables through filter and planner.

use std::fs;

use u_curriculum::catalog::{load_course_table, load_requirement_table, prepare_catalog};
use u_curriculum::models::{EnglishLevel, Settings};
use u_curriculum::scheduler::{CourseScheduler, ProgressReport, ScheduleRequest};
use u_curriculum::validation::validate_catalog;

const COURSES: &str = "\
科號,中文課名,系所全名,學分,教師,等級制,上課時間,通識分類
11210CS 135500,計算機程式設計一,資訊工程學系,3,甲,8,M3M4,
11210CS 135501,計算機程式設計一,資訊工程學系,3,乙,9,T3T4,
11210CS 235100,資料結構,資訊工程學系,3,丙,7,W3W4,
11210CS 342300,軟體工程,資訊工程學系,3,丁,8,R7R8,
11210CS 342400,資料庫系統概論,資訊工程學系,3,戊,6,F7F8,
11210CS 442500,編譯器設計,資訊工程學系,3,己,5,M7M8,
11210CS 399000,專題一,資訊工程學系,3,庚,10,S1S2,
11210MATH101000,微積分Ａ一,數學系,4,辛,6,M1M2,
11210MATH102000,線性代數,數學系,3,壬,9,T1T2,
11210GEC 120100,哲學概論,通識教育中心,2,癸,7,W5W6,核心通識CoreGEcourses1
11210GEC 120200,藝術欣賞,通識教育中心,2,子,4,R5R6,
11210CL 101000,大學中文,中國文學系,2,丑,5,F3F4,
11210LANG100100,演說與簡報,英語教育中心,2,寅,6,M5M6,
";

const REQUIREMENTS: &str = "\
中文課名,科號,類別
計算機程式設計一,11210CS 135500,1
資料結構,11210CS 235100,1
微積分Ｂ一,-1,1
";

#[test]
fn test_csv_to_timetable() {
    u_curriculum::logging::init_test();

    let dir = tempfile::tempdir().unwrap();
    let courses_path = dir.path().join("courses.csv");
    let requirements_path = dir.path().join("requirements.csv");
    fs::write(&courses_path, COURSES).unwrap();
    fs::write(&requirements_path, REQUIREMENTS).unwrap();

    let records = load_course_table(&courses_path).unwrap();
    let requirements = load_requirement_table(&requirements_path).unwrap();

    let settings = Settings {
        english_level: EnglishLevel::Advanced,
        english_electives: vec!["演說與簡報".into()],
        unwanted_courses: vec!["編譯器設計".into()],
        ..Settings::default()
    };
    let catalog = prepare_catalog(&records, &settings);
    assert!(validate_catalog(&catalog.courses).is_ok());
    // Mathematics is not in scope, only the named calculus series
    assert!(catalog.find("線性代數").is_none());
    assert!(catalog.find("微積分Ａ一").is_some());
    assert!(!catalog.breadth_picks.iter().any(|n| n == "編譯器設計"));

    let request = ScheduleRequest::new(catalog, requirements, settings);
    let scheduler = CourseScheduler::new();
    let t = scheduler.schedule(&request);

    // Best-rated section of the required course
    let programming = t
        .all_courses()
        .find(|c| c.name == "計算機程式設計一")
        .unwrap();
    assert_eq!(programming.instructor, "乙");
    assert_eq!(t.semester_of("計算機程式設計一"), Some(0));

    assert!(t.contains("微積分Ａ一"));
    assert!(t.fulfilled.contains("微積分Ｂ一"));
    assert!(t.contains("大學中文"));
    assert!(t.contains("演說與簡報"));
    assert!(t.contains("哲學概論"));
    assert!(!t.contains("編譯器設計"));
    // Second-year course lands in a second-year term
    assert!(matches!(t.semester_of("資料結構"), Some(2 | 3)));
    assert!(t.unmet_requirements.is_empty());

    let report = ProgressReport::calculate(&t, scheduler.quotas());
    assert_eq!(report.total_credits, t.total_credits);
    assert!(report.remaining_credits > 0);
}
