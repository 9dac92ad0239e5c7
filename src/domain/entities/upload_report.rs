//! # UploadReport
//!
//! 一括アップロード実行全体の集計結果

use chrono::{DateTime, Utc};

use super::step_outcome::{Operation, StepOutcome};

/// 操作ごとの集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationCounts {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// アップロードレポート
///
/// 各ステップの結果を実行順に保持する
#[derive(Debug, Clone)]
pub struct UploadReport {
    run_id: String,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    outcomes: Vec<StepOutcome>,
}

impl UploadReport {
    /// 新しいレポートを作成
    ///
    /// # Arguments
    ///
    /// * `run_id` - 実行ID（ログの突き合わせ用）
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            started_at: Utc::now(),
            finished_at: None,
            outcomes: Vec::new(),
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// ステップ結果を記録
    pub fn record(&mut self, outcome: StepOutcome) {
        self.outcomes.push(outcome);
    }

    /// 実行終了を記録
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// 記録された全結果（実行順）
    pub fn outcomes(&self) -> &[StepOutcome] {
        &self.outcomes
    }

    /// 失敗した結果のみ
    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    /// 指定ディレクトリの指定操作の結果
    pub fn outcome(&self, directory: &str, operation: Operation) -> Option<&StepOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.directory == directory && o.operation == operation)
    }

    /// 操作ごとの集計
    pub fn counts_for(&self, operation: Operation) -> OperationCounts {
        self.outcomes
            .iter()
            .filter(|o| o.operation == operation)
            .fold(OperationCounts::default(), |mut acc, o| {
                if o.is_success() {
                    acc.succeeded += 1;
                } else if o.is_failure() {
                    acc.failed += 1;
                } else {
                    acc.skipped += 1;
                }
                acc
            })
    }

    /// 失敗数の合計
    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// 全ステップが成功したかどうか
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(StepOutcome::is_success)
    }
}
