//! Example board used when no prior session exists.

use super::{
    BoardState, EstimateMinutes, ExtendedMode, Ordinal, Task, TaskData, TaskId, TaskPriority,
    TaskStatus, TaskTitle,
};
use chrono::{DateTime, Utc};

struct SeedTask {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    priority: TaskPriority,
    tags: &'static [&'static str],
    estimate_minutes: u32,
    created_at: i64,
    due_at: Option<i64>,
    status: TaskStatus,
    position: usize,
}

const SEED_TASKS: [SeedTask; 6] = [
    SeedTask {
        id: "seed-1",
        title: "Revisar apertura de mercado Asia",
        description: "Validar gaps y liquidez en pares principales.",
        priority: TaskPriority::High,
        tags: &["trading", "asia"],
        estimate_minutes: 35,
        created_at: 1_770_019_800,
        due_at: Some(1_770_033_600),
        status: TaskStatus::Todo,
        position: 0,
    },
    SeedTask {
        id: "seed-2",
        title: "Actualizar niveles de riesgo semanal",
        description: "Recalcular exposición por sector y beta.",
        priority: TaskPriority::Medium,
        tags: &["riesgo", "portfolio"],
        estimate_minutes: 60,
        created_at: 1_770_020_100,
        due_at: None,
        status: TaskStatus::Todo,
        position: 1,
    },
    SeedTask {
        id: "seed-3",
        title: "Preparar reporte de volatilidad",
        description: "Incluye VIX, skew y correlaciones clave.",
        priority: TaskPriority::High,
        tags: &["reporte", "volatilidad"],
        estimate_minutes: 90,
        created_at: 1_770_020_400,
        due_at: Some(1_770_134_400),
        status: TaskStatus::Doing,
        position: 0,
    },
    SeedTask {
        id: "seed-4",
        title: "Revisión de alertas macro",
        description: "Chequear CPI, PMI y comentarios de la Fed.",
        priority: TaskPriority::Low,
        tags: &["macro", "alertas"],
        estimate_minutes: 20,
        created_at: 1_770_020_700,
        due_at: None,
        status: TaskStatus::Doing,
        position: 1,
    },
    SeedTask {
        id: "seed-5",
        title: "Enviar resumen diario al equipo",
        description: "Incluye top movers y riesgos abiertos.",
        priority: TaskPriority::Medium,
        tags: &["comunicacion"],
        estimate_minutes: 25,
        created_at: 1_770_021_000,
        due_at: None,
        status: TaskStatus::Done,
        position: 0,
    },
    SeedTask {
        id: "seed-6",
        title: "Auditar cambios de stops",
        description: "Verificar ejecuciones y slippage.",
        priority: TaskPriority::Low,
        tags: &["auditoria"],
        estimate_minutes: 40,
        created_at: 1_770_021_120,
        due_at: None,
        status: TaskStatus::Done,
        position: 1,
    },
];

fn timestamp(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or_default()
}

/// Builds the starting board: six example tasks, two per column, an empty
/// audit log, and extended mode off.
#[must_use]
pub fn seed_state() -> BoardState {
    let tasks = SEED_TASKS
        .iter()
        .map(|seed| {
            Task::from_data(TaskData {
                id: TaskId::from(seed.id),
                title: TaskTitle::trusted(seed.title),
                description: Some(seed.description.to_owned()),
                priority: seed.priority,
                tags: seed.tags.iter().map(|tag| (*tag).to_owned()).collect(),
                estimate_minutes: EstimateMinutes::trusted(seed.estimate_minutes),
                created_at: timestamp(seed.created_at),
                due_at: seed.due_at.map(timestamp),
                status: seed.status,
                ordinal: Ordinal::from_index(seed.position),
                rubric_score: None,
                rubric_comment: None,
                observations: None,
            })
        })
        .collect();
    BoardState::new(tasks, Vec::new(), ExtendedMode::default())
}
