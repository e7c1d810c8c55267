/// Use cases module containing application business logic orchestration
mod analyze_bom;

pub use analyze_bom::AnalyzeBomUseCase;
