//! # Balance Replay Invariant
//!
//! The register's core testable property: replaying every committed
//! transaction for an item in commit order, from zero (or from the most
//! recent `Check`, which resets the baseline), reproduces
//! `current_balance` exactly.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{Register, TestDirectory};
    use cdr_engine::{Proposal, ProposalStage};
    use cdr_types::{
        Actor, CommittedTransaction, DrugClass, Grade, TransactionKind,
    };

    /// Replay from zero: fold each delta and demand every intermediate
    /// running balance matches the recorded `balance_after`.
    fn replay_from_zero(transactions: &[CommittedTransaction]) -> i64 {
        let mut running = 0i64;
        for tx in transactions {
            running += tx.delta;
            assert_eq!(
                i64::from(tx.balance_after),
                running,
                "replay diverged at {} {:?}",
                tx.kind,
                tx.id
            );
        }
        running
    }

    async fn commit_ungated(
        register: &Register,
        item: cdr_types::ItemId,
        kind: TransactionKind,
        quantity: u32,
        actor: &Actor,
    ) -> CommittedTransaction {
        let draft = Proposal::new(item, kind, quantity, actor.clone());
        let validated = register.engine.propose(draft).unwrap().validated().unwrap();
        register.engine.commit(validated).await.unwrap()
    }

    async fn commit_witnessed(
        register: &Register,
        auth: &cdr_witness::WitnessAuthenticator<TestDirectory, TestDirectory>,
        witness: &Actor,
        pin: &str,
        item: cdr_types::ItemId,
        kind: TransactionKind,
        quantity: u32,
        actor: &Actor,
    ) -> CommittedTransaction {
        let draft = Proposal::new(item, kind, quantity, actor.clone());
        let ProposalStage::AwaitingWitness(parked) = register.engine.propose(draft).unwrap()
        else {
            panic!("expected witness gating for {kind}");
        };
        let assertion = auth.verify(witness.id, pin).await.unwrap();
        register
            .engine
            .commit(parked.attach_witness(assertion).validate().unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn full_history_replays_to_the_current_balance() {
        let register = Register::new();
        let item = register.onboard("Morphine Sulphate", DrugClass::Controlled);

        let paramedic = Actor::new("A. Paramedic", Grade::Paramedic);
        let witness = Actor::new("B. Witness", Grade::Paramedic);
        let mut directory = TestDirectory::new();
        directory.enroll_hashed(&witness, "4821");
        let auth = directory.authenticator();

        commit_ungated(&register, item.id, TransactionKind::Receive, 20, &paramedic).await;
        commit_ungated(&register, item.id, TransactionKind::Administer, 3, &paramedic).await;
        commit_witnessed(
            &register, &auth, &witness, "4821",
            item.id, TransactionKind::Waste, 2, &paramedic,
        )
        .await;
        commit_ungated(&register, item.id, TransactionKind::Move, 5, &paramedic).await;
        commit_ungated(&register, item.id, TransactionKind::Receive, 4, &paramedic).await;

        let transactions = register.catalog.transactions_for(item.id).unwrap();
        assert_eq!(transactions.len(), 5);

        let replayed = replay_from_zero(&transactions);
        assert_eq!(replayed, i64::from(register.catalog.balance(item.id).unwrap()));
        assert_eq!(replayed, 14);
    }

    #[tokio::test]
    async fn check_resets_the_replay_baseline() {
        let register = Register::new();
        let item = register.onboard("Diazepam", DrugClass::Controlled);

        let paramedic = Actor::new("A. Paramedic", Grade::Paramedic);
        let witness = Actor::new("B. Witness", Grade::Paramedic);
        let mut directory = TestDirectory::new();
        directory.enroll_hashed(&witness, "9024");
        let auth = directory.authenticator();

        commit_ungated(&register, item.id, TransactionKind::Receive, 10, &paramedic).await;
        commit_ungated(&register, item.id, TransactionKind::Administer, 2, &paramedic).await;
        // Physical count disagrees with the record: 7 on the shelf, 8 recorded.
        let check = commit_witnessed(
            &register, &auth, &witness, "9024",
            item.id, TransactionKind::Check, 7, &paramedic,
        )
        .await;
        commit_ungated(&register, item.id, TransactionKind::Administer, 4, &paramedic).await;

        let transactions = register.catalog.transactions_for(item.id).unwrap();

        // Full replay from zero still reproduces the balance, because the
        // check's delta absorbs the correction.
        assert_eq!(
            replay_from_zero(&transactions),
            i64::from(register.catalog.balance(item.id).unwrap())
        );

        // Replay from the most recent check as the new baseline.
        let check_index = transactions
            .iter()
            .position(|tx| tx.id == check.id)
            .unwrap();
        let mut running = i64::from(transactions[check_index].balance_after);
        for tx in &transactions[check_index + 1..] {
            running += tx.delta;
            assert_eq!(i64::from(tx.balance_after), running);
        }
        assert_eq!(running, 3);
        assert_eq!(register.catalog.balance(item.id).unwrap(), 3);
    }
}
