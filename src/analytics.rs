// ============================================================================
// Analytics : crédits vs débits
// ============================================================================
// Résumé de trésorerie affiché par l'écran "Budgeting" :
// total des crédits, total des débits, part de chaque côté dans le volume.
// Les transactions en échec ou de type inconnu ne comptent pas.
// ============================================================================

use crate::models::{Transaction, TransactionType};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CashFlowSummary {
    pub credit_total: f64,
    pub debit_total: f64,
    pub credit_count: usize,
    pub debit_count: usize,
}

impl CashFlowSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        transactions
            .iter()
            .filter(|t| !t.is_failed() && t.amount.is_finite())
            .fold(Self::default(), |mut summary, t| {
                match t.transaction_type {
                    TransactionType::Credit => {
                        summary.credit_total += t.amount;
                        summary.credit_count += 1;
                    }
                    TransactionType::Debit => {
                        summary.debit_total += t.amount;
                        summary.debit_count += 1;
                    }
                    TransactionType::Unknown => {}
                }
                summary
            })
    }

    /// Volume total (crédits + débits)
    pub fn volume(&self) -> f64 {
        self.credit_total + self.debit_total
    }

    /// Solde net de la période
    pub fn net(&self) -> f64 {
        self.credit_total - self.debit_total
    }

    /// Part des crédits en pourcentage ; 0 si aucun mouvement
    pub fn credit_share(&self) -> f64 {
        share(self.credit_total, self.volume())
    }

    pub fn debit_share(&self) -> f64 {
        share(self.debit_total, self.volume())
    }

    pub fn is_empty(&self) -> bool {
        self.credit_count == 0 && self.debit_count == 0
    }
}

fn share(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(kind: TransactionType, amount: f64, status: &str) -> Transaction {
        Transaction {
            id: "1".to_string(),
            account_number: "2024000001".to_string(),
            transaction_type: kind,
            amount,
            created_at: None,
            status: status.to_string(),
        }
    }

    #[test]
    fn test_summary_totals_and_shares() {
        let transactions = vec![
            tx(TransactionType::Credit, 300.0, "SUCCESS"),
            tx(TransactionType::Credit, 450.0, "SUCCESS"),
            tx(TransactionType::Debit, 250.0, "SUCCESS"),
            tx(TransactionType::Debit, 999.0, "FAILED"),
            tx(TransactionType::Unknown, 50.0, "SUCCESS"),
        ];

        let summary = CashFlowSummary::from_transactions(&transactions);
        assert_eq!(summary.credit_total, 750.0);
        assert_eq!(summary.debit_total, 250.0);
        assert_eq!(summary.credit_count, 2);
        assert_eq!(summary.debit_count, 1);
        assert_eq!(summary.net(), 500.0);
        assert_eq!(summary.credit_share(), 75.0);
        assert_eq!(summary.debit_share(), 25.0);
    }

    #[test]
    fn test_empty_summary() {
        let summary = CashFlowSummary::from_transactions(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.credit_share(), 0.0);
        assert_eq!(summary.debit_share(), 0.0);
    }
}
