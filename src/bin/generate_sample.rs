//! Write a small deterministic sample dataset (`colleges.json`) for trying
//! out the CLI without real data.

use anyhow::{Context, Result};
use placement_stats::data::model::{BranchStat, Dataset, Institution, YearStats};

fn stat(
    branch: &str,
    packages: (f64, f64, f64, f64),
    placement: f64,
    students: (u64, u64),
) -> BranchStat {
    let (highest, lowest, median, average) = packages;
    BranchStat {
        branch: branch.to_string(),
        highest_package: Some(highest),
        lowest_package: Some(lowest),
        median_package: Some(median),
        average_package: Some(average),
        placement_percentage: Some(placement),
        registered_students: Some(students.0),
        placed_students: Some(students.1),
    }
}

fn sample_institutions() -> Vec<Institution> {
    vec![
        Institution {
            key: "iit_bombay".to_string(),
            name: "IIT Bombay".to_string(),
            photo: None,
            nirf_rank: Some(3),
            qs_world_ranking: Some(118),
            current: YearStats {
                ug: vec![
                    stat("CSE", (180.0, 17.0, 32.0, 38.5), 96.0, (140, 134)),
                    stat("ECE", (120.0, 12.0, 24.0, 27.0), 92.5, (110, 102)),
                    // A branch that reported no package figures this year.
                    BranchStat {
                        branch: "Civil".to_string(),
                        placement_percentage: Some(78.0),
                        registered_students: Some(80),
                        placed_students: Some(62),
                        ..BranchStat::default()
                    },
                ],
                pg: vec![stat("M.Tech CSE", (90.0, 10.0, 21.0, 23.0), 88.0, (60, 53))],
            },
            one_year_back: Some(YearStats {
                ug: vec![
                    stat("CSE", (160.0, 15.0, 29.0, 34.0), 95.0, (138, 131)),
                    stat("ECE", (100.0, 11.0, 22.0, 25.0), 91.0, (108, 98)),
                ],
                pg: vec![stat("M.Tech CSE", (80.0, 9.0, 19.0, 21.0), 86.0, (58, 50))],
            }),
            two_year_back: Some(YearStats {
                ug: vec![stat("CSE", (140.0, 14.0, 26.0, 30.0), 94.0, (132, 124))],
                pg: vec![],
            }),
        },
        Institution {
            key: "nit_trichy".to_string(),
            name: "NIT Trichy".to_string(),
            photo: None,
            nirf_rank: Some(9),
            qs_world_ranking: None,
            current: YearStats {
                ug: vec![
                    stat("CSE", (52.0, 7.0, 16.0, 18.0), 93.0, (120, 112)),
                    stat("Mechanical", (30.0, 5.0, 9.5, 11.0), 81.0, (95, 77)),
                ],
                pg: vec![],
            },
            one_year_back: Some(YearStats {
                ug: vec![stat("CSE", (45.0, 6.5, 14.0, 16.0), 90.0, (118, 106))],
                pg: vec![],
            }),
            // No two-years-back data at all for this institution.
            two_year_back: None,
        },
        Institution {
            key: "iiit_hyderabad".to_string(),
            name: "IIIT Hyderabad".to_string(),
            photo: None,
            nirf_rank: None,
            qs_world_ranking: None,
            current: YearStats {
                ug: vec![stat("CSE", (110.0, 14.0, 30.0, 33.0), 97.0, (90, 88))],
                pg: vec![],
            },
            one_year_back: None,
            two_year_back: None,
        },
    ]
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "colleges.json".to_string());

    let dataset = Dataset::from_institutions(sample_institutions());
    let text = serde_json::to_string_pretty(&dataset.to_raw())?;
    std::fs::write(&output_path, text)
        .with_context(|| format!("writing {output_path}"))?;

    println!("Wrote {} institutions to {output_path}", dataset.len());
    Ok(())
}
