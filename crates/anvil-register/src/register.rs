//! # Register
//!
//! The stateful billing session behind one counter. Owns the transaction
//! under construction and drives every workflow operation through the
//! in-flight guard, so there is never more than one remote call mutating
//! the bill at a time.
//!
//! ## Billing Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Register Operations                              │
//! │                                                                         │
//! │  Operator Action        Register Method       Remote Call               │
//! │  ───────────────        ───────────────       ───────────               │
//! │                                                                         │
//! │  Scan / type id ───────► add_line() ─────────► GET getProduct           │
//! │                            │ accept line locally                        │
//! │                            ▼                                            │
//! │  Continue old bill ────► resume_bill() ──────► GET getBill              │
//! │                            │ reopen with synced lines                   │
//! │                            ▼                                            │
//! │  Checkout ─────────────► submit() ───────────► POST createBill          │
//! │                            │                   (PUT updateBill when     │
//! │                            │                    resuming)               │
//! │                            ▼                                            │
//! │  Print ────────────────► save_invoice() ─────► invoice text file        │
//! │                            │                                            │
//! │                            ▼                                            │
//! │  Next customer ────────► new_bill()           (local only)              │
//! │                                                                         │
//! │  Every method claims the in-flight flag first; a second operation       │
//! │  arriving mid-call gets Busy instead of interleaving.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The transaction sits in a `Mutex` and methods take `&self`, so a
//! `Register` can be shared behind an `Arc`. The lock is never held
//! across an `await`; remote calls work on snapshots and re-lock to
//! apply results.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use anvil_core::validation::{parse_quantity, validate_product_id};
use anvil_core::{CoreError, Invoice, Transaction, TransactionLine, TransactionStatus};
use anvil_gateway::billing::BillRecord;
use anvil_gateway::inventory::InventoryRecord;

use crate::error::{WorkflowError, WorkflowResult};
use crate::flight::InFlightFlag;
use crate::ports::{BillingService, DocumentSink, ProductDirectory};
use crate::session::SessionContext;

// =============================================================================
// Register
// =============================================================================

pub struct Register {
    context: SessionContext,
    directory: Arc<dyn ProductDirectory>,
    billing: Arc<dyn BillingService>,
    documents: Arc<dyn DocumentSink>,
    transaction: Mutex<Transaction>,
    flight: InFlightFlag,
}

impl std::fmt::Debug for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The collaborator ports are trait objects and the context holds an
        // auth token, so neither is formatted here.
        f.debug_struct("Register")
            .field("transaction", &self.transaction)
            .field("flight", &self.flight)
            .finish_non_exhaustive()
    }
}

impl Register {
    /// Opens a register for the given session context.
    ///
    /// Fails when the context is missing any of the identifiers the
    /// gateway calls need.
    pub fn new(
        context: SessionContext,
        directory: Arc<dyn ProductDirectory>,
        billing: Arc<dyn BillingService>,
        documents: Arc<dyn DocumentSink>,
    ) -> WorkflowResult<Self> {
        context.validate()?;
        Ok(Register {
            context,
            directory,
            billing,
            documents,
            transaction: Mutex::new(Transaction::new()),
            flight: InFlightFlag::new(),
        })
    }

    // ===== Billing Operations =====

    /// Accepts one billing line: looks the product up, checks stock and
    /// appends it to the current transaction.
    ///
    /// Validation runs before the lookup, so bad input never costs a
    /// round trip. On any failure the transaction is left untouched.
    pub async fn add_line(
        &self,
        product_id: &str,
        quantity_raw: &str,
    ) -> WorkflowResult<TransactionLine> {
        let _guard = self.flight.try_begin("add line")?;

        validate_product_id(product_id)?;
        let quantity = parse_quantity(quantity_raw)?;
        self.with_transaction(|tx| {
            if tx.status() == TransactionStatus::Finished {
                return Err(CoreError::TransactionFinished {
                    bill_id: tx.bill_id().to_string(),
                });
            }
            Ok(())
        })?;

        let product = self
            .directory
            .lookup(&self.context.scope(), product_id)
            .await?;

        let line = self.with_transaction_mut(|tx| tx.add_line(&product, quantity).cloned())?;
        debug!(
            product_id = %line.product_id,
            quantity = line.quantity,
            line_total = line.line_total,
            running_total = self.running_total(),
            "Line accepted"
        );
        Ok(line)
    }

    /// Reopens a bill the server already has, replacing the current
    /// (empty or finished) transaction.
    ///
    /// Refused while an unfinished bill is open; its lines would be lost.
    pub async fn resume_bill(&self, billing_id: &str) -> WorkflowResult<BillRecord> {
        let _guard = self.flight.try_begin("resume bill")?;

        self.with_transaction(|tx| {
            if tx.status() == TransactionStatus::Accumulating {
                return Err(WorkflowError::OpenTransaction {
                    bill_id: tx.bill_id().to_string(),
                });
            }
            Ok(())
        })?;

        let record = self.billing.fetch(billing_id).await?;
        let lines: Vec<TransactionLine> = record
            .list_of_products
            .iter()
            .map(|line| {
                TransactionLine::new(
                    line.product_id.clone(),
                    line.billing_price,
                    None,
                    line.billed_quantity,
                )
            })
            .collect();

        let resumed = Transaction::resume(record.id.clone(), lines);
        info!(
            bill_id = %record.id,
            lines = resumed.line_count(),
            "Bill resumed"
        );
        self.with_transaction_mut(|tx| *tx = resumed);
        Ok(record)
    }

    /// Sends the current bill to the server and finishes the transaction.
    ///
    /// A fresh bill is created whole; a resumed one gets only the lines
    /// added since it was fetched. The server-assigned id replaces the
    /// local bill number.
    pub async fn submit(&self) -> WorkflowResult<BillRecord> {
        let _guard = self.flight.try_begin("submit")?;

        let (bill_id, server_bill, outgoing) = self.with_transaction(|tx| {
            if tx.is_empty() {
                return Err(WorkflowError::from(CoreError::EmptyTransaction));
            }
            if tx.status() == TransactionStatus::Finished {
                return Err(CoreError::TransactionFinished {
                    bill_id: tx.bill_id().to_string(),
                }
                .into());
            }
            Ok((
                tx.bill_id().to_string(),
                tx.is_server_bill(),
                tx.unsynced_lines().to_vec(),
            ))
        })?;

        let scope = self.context.scope();
        let record = if server_bill {
            if outgoing.is_empty() {
                return Err(WorkflowError::NothingToSubmit);
            }
            debug!(bill_id = %bill_id, lines = outgoing.len(), "Appending to existing bill");
            self.billing.append(&scope, &bill_id, &outgoing).await?
        } else {
            self.billing.create(&scope, &outgoing).await?
        };

        self.with_transaction_mut(|tx| {
            tx.adopt_bill_id(record.id.clone());
            tx.mark_synced();
            tx.finish()
        })?;

        info!(bill_id = %record.id, lines = outgoing.len(), "Bill submitted");
        Ok(record)
    }

    /// Renders the current transaction to an invoice document and hands
    /// it to the document sink.
    ///
    /// An open transaction is finished once the save succeeds; rendering
    /// an already finished bill again (a reprint) leaves it finished.
    pub async fn save_invoice(&self) -> WorkflowResult<PathBuf> {
        let _guard = self.flight.try_begin("save invoice")?;

        let document = self.with_transaction(|tx| {
            Invoice::build(tx, &self.context.store_id).map(Invoice::into_document)
        })?;

        let path = self.documents.save(&document).await?;

        self.with_transaction_mut(|tx| {
            if tx.status() == TransactionStatus::Accumulating {
                tx.finish()?;
            }
            Ok::<(), CoreError>(())
        })?;

        debug!(?path, "Invoice rendered");
        Ok(path)
    }

    /// Starts the next bill, discarding whatever the current transaction
    /// holds.
    pub fn new_bill(&self) -> WorkflowResult<()> {
        let _guard = self.flight.try_begin("new bill")?;

        self.with_transaction_mut(|tx| {
            let unsubmitted = tx.unsynced_lines().len();
            if tx.status() == TransactionStatus::Accumulating && unsubmitted > 0 {
                warn!(
                    bill_id = %tx.bill_id(),
                    discarded = unsubmitted,
                    "Discarding unsubmitted lines"
                );
            }
            *tx = Transaction::new();
        });
        Ok(())
    }

    /// Lists the store's inventory for the operator.
    pub async fn view_inventory(&self) -> WorkflowResult<Vec<InventoryRecord>> {
        let _guard = self.flight.try_begin("view inventory")?;
        self.directory.list_inventory(&self.context.scope()).await
    }

    // ===== Accessors =====

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn bill_id(&self) -> String {
        self.with_transaction(|tx| tx.bill_id().to_string())
    }

    pub fn status(&self) -> TransactionStatus {
        self.with_transaction(|tx| tx.status())
    }

    pub fn line_count(&self) -> usize {
        self.with_transaction(|tx| tx.line_count())
    }

    /// Unrounded running total of the current transaction.
    pub fn running_total(&self) -> f64 {
        self.with_transaction(|tx| tx.running_total())
    }

    /// Snapshot of the current lines, for display.
    pub fn lines(&self) -> Vec<TransactionLine> {
        self.with_transaction(|tx| tx.lines().to_vec())
    }

    pub fn is_busy(&self) -> bool {
        self.flight.is_busy()
    }

    // ===== Lock Helpers =====

    /// Executes a function with read access to the transaction.
    fn with_transaction<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Transaction) -> R,
    {
        let tx = self.transaction.lock().expect("Transaction mutex poisoned");
        f(&tx)
    }

    /// Executes a function with write access to the transaction.
    ///
    /// Callers must not hold the returned data across an `await`; the
    /// closure runs synchronously and the lock drops on return.
    fn with_transaction_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Transaction) -> R,
    {
        let mut tx = self.transaction.lock().expect("Transaction mutex poisoned");
        f(&mut tx)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    use anvil_core::{Document, Product};
    use anvil_gateway::billing::BillLineRecord;
    use anvil_gateway::GatewayError;
    use crate::session::CounterScope;

    // ===== Fakes =====

    struct Hold {
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    struct FakeDirectory {
        products: HashMap<String, Product>,
        records: Vec<InventoryRecord>,
        lookups: AtomicUsize,
        hold: Option<Hold>,
    }

    impl FakeDirectory {
        fn with_products(products: Vec<Product>) -> Self {
            let products = products
                .into_iter()
                .map(|p| (p.product_id.clone(), p))
                .collect();
            FakeDirectory {
                products,
                records: Vec::new(),
                lookups: AtomicUsize::new(0),
                hold: None,
            }
        }
    }

    #[async_trait]
    impl ProductDirectory for FakeDirectory {
        async fn lookup(
            &self,
            _scope: &CounterScope,
            product_id: &str,
        ) -> WorkflowResult<Product> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if let Some(hold) = &self.hold {
                hold.entered.notify_one();
                hold.release.notified().await;
            }
            self.products.get(product_id).cloned().ok_or_else(|| {
                GatewayError::NotFound {
                    resource: "product".to_string(),
                    id: product_id.to_string(),
                }
                .into()
            })
        }

        async fn list_inventory(
            &self,
            _scope: &CounterScope,
        ) -> WorkflowResult<Vec<InventoryRecord>> {
            Ok(self.records.clone())
        }
    }

    #[derive(Default)]
    struct FakeBilling {
        on_server: HashMap<String, BillRecord>,
        created: Mutex<Vec<usize>>,
        appended: Mutex<Vec<(String, usize)>>,
    }

    #[async_trait]
    impl BillingService for FakeBilling {
        async fn create(
            &self,
            scope: &CounterScope,
            lines: &[TransactionLine],
        ) -> WorkflowResult<BillRecord> {
            self.created.lock().unwrap().push(lines.len());
            Ok(BillRecord {
                id: "SRV-1".to_string(),
                selling_date: None,
                list_of_products: lines
                    .iter()
                    .map(|line| BillLineRecord {
                        product_id: line.product_id.clone(),
                        billed_quantity: line.quantity,
                        counter_id: Some(scope.counter_id.clone()),
                        billing_price: line.unit_price,
                    })
                    .collect(),
            })
        }

        async fn fetch(&self, billing_id: &str) -> WorkflowResult<BillRecord> {
            self.on_server.get(billing_id).cloned().ok_or_else(|| {
                GatewayError::NotFound {
                    resource: "bill".to_string(),
                    id: billing_id.to_string(),
                }
                .into()
            })
        }

        async fn append(
            &self,
            _scope: &CounterScope,
            billing_id: &str,
            lines: &[TransactionLine],
        ) -> WorkflowResult<BillRecord> {
            self.appended
                .lock()
                .unwrap()
                .push((billing_id.to_string(), lines.len()));
            Ok(BillRecord {
                id: billing_id.to_string(),
                selling_date: None,
                list_of_products: Vec::new(),
            })
        }
    }

    #[derive(Default)]
    struct FakeSink {
        saved: Mutex<Vec<Document>>,
    }

    #[async_trait]
    impl DocumentSink for FakeSink {
        async fn save(&self, document: &Document) -> WorkflowResult<PathBuf> {
            let path = PathBuf::from(format!("{}.txt", document.file_stem()));
            self.saved.lock().unwrap().push(document.clone());
            Ok(path)
        }
    }

    // ===== Helpers =====

    fn product(id: &str, unit_price: f64, stock: u32) -> Product {
        Product {
            product_id: id.to_string(),
            name: format!("Product {id}"),
            unit_price,
            tax_rate: None,
            available_stock: stock,
        }
    }

    fn context() -> SessionContext {
        SessionContext::new("E-7", "S-1", "C-1")
    }

    fn register_with(
        products: Vec<Product>,
        billing: Arc<FakeBilling>,
    ) -> (Arc<Register>, Arc<FakeSink>) {
        let directory = Arc::new(FakeDirectory::with_products(products));
        let sink = Arc::new(FakeSink::default());
        let register =
            Register::new(context(), directory, billing, sink.clone()).unwrap();
        (Arc::new(register), sink)
    }

    fn shelf() -> Vec<Product> {
        vec![product("P-1", 10.0, 25), product("P-2", 5.5, 10)]
    }

    // ===== Tests =====

    #[test]
    fn test_new_rejects_incomplete_context() {
        let directory = Arc::new(FakeDirectory::with_products(Vec::new()));
        let billing = Arc::new(FakeBilling::default());
        let sink = Arc::new(FakeSink::default());

        let err = Register::new(
            SessionContext::new("", "S-1", "C-1"),
            directory,
            billing,
            sink,
        )
        .unwrap_err();
        assert!(err.is_missing_context());
    }

    #[tokio::test]
    async fn test_add_line_accumulates_and_totals() {
        let (register, _sink) = register_with(shelf(), Arc::new(FakeBilling::default()));

        let line = register.add_line("P-1", "2").await.unwrap();
        assert_eq!(line.line_total, 20.0);
        assert_eq!(register.running_total(), 20.0);
        assert_eq!(register.status(), TransactionStatus::Accumulating);

        register.add_line("P-2", "1").await.unwrap();
        assert_eq!(register.line_count(), 2);
        assert_eq!(register.running_total(), 25.5);
    }

    #[tokio::test]
    async fn test_unknown_product_leaves_transaction_unchanged() {
        let (register, _sink) = register_with(shelf(), Arc::new(FakeBilling::default()));

        let err = register.add_line("P-9", "1").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(register.line_count(), 0);
        assert_eq!(register.status(), TransactionStatus::Empty);
    }

    #[tokio::test]
    async fn test_insufficient_stock_reported_with_counts() {
        let (register, _sink) = register_with(
            vec![product("P-1", 10.0, 3)],
            Arc::new(FakeBilling::default()),
        );

        let err = register.add_line("P-1", "5").await.unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Core(CoreError::InsufficientStock {
                available: 3,
                requested: 5,
                ..
            })
        ));
        assert_eq!(register.line_count(), 0);
    }

    #[tokio::test]
    async fn test_bad_quantity_rejected_before_lookup() {
        let directory = Arc::new(FakeDirectory::with_products(shelf()));
        let billing = Arc::new(FakeBilling::default());
        let sink = Arc::new(FakeSink::default());
        let register =
            Register::new(context(), directory.clone(), billing, sink).unwrap();

        assert!(register.add_line("P-1", "2.5").await.is_err());
        assert!(register.add_line("P-1", "-1").await.is_err());
        assert!(register.add_line("", "1").await.is_err());
        assert_eq!(directory.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_submit_fresh_bill_creates_and_finishes() {
        let billing = Arc::new(FakeBilling::default());
        let (register, _sink) = register_with(shelf(), billing.clone());

        register.add_line("P-1", "2").await.unwrap();
        register.add_line("P-2", "1").await.unwrap();

        let record = register.submit().await.unwrap();
        assert_eq!(record.id, "SRV-1");
        assert_eq!(billing.created.lock().unwrap().as_slice(), &[2]);
        assert!(billing.appended.lock().unwrap().is_empty());
        assert_eq!(register.bill_id(), "SRV-1");
        assert_eq!(register.status(), TransactionStatus::Finished);
    }

    #[tokio::test]
    async fn test_submit_empty_transaction_fails() {
        let (register, _sink) = register_with(shelf(), Arc::new(FakeBilling::default()));
        let err = register.submit().await.unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Core(CoreError::EmptyTransaction)
        ));
    }

    #[tokio::test]
    async fn test_second_submit_reports_finished_bill() {
        let (register, _sink) = register_with(shelf(), Arc::new(FakeBilling::default()));
        register.add_line("P-1", "1").await.unwrap();
        register.submit().await.unwrap();

        let err = register.submit().await.unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Core(CoreError::TransactionFinished { .. })
        ));
    }

    #[tokio::test]
    async fn test_finished_bill_rejects_more_lines() {
        let (register, _sink) = register_with(shelf(), Arc::new(FakeBilling::default()));
        register.add_line("P-1", "1").await.unwrap();
        register.submit().await.unwrap();

        let err = register.add_line("P-2", "1").await.unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Core(CoreError::TransactionFinished { .. })
        ));
        assert_eq!(register.line_count(), 1);
    }

    #[tokio::test]
    async fn test_resume_then_submit_appends_only_new_lines() {
        let mut billing = FakeBilling::default();
        billing.on_server.insert(
            "SRV-77".to_string(),
            BillRecord {
                id: "SRV-77".to_string(),
                selling_date: None,
                list_of_products: vec![
                    BillLineRecord {
                        product_id: "P-1".to_string(),
                        billed_quantity: 2,
                        counter_id: Some("C-1".to_string()),
                        billing_price: 10.0,
                    },
                    BillLineRecord {
                        product_id: "P-2".to_string(),
                        billed_quantity: 1,
                        counter_id: Some("C-1".to_string()),
                        billing_price: 5.5,
                    },
                ],
            },
        );
        let billing = Arc::new(billing);
        let (register, _sink) = register_with(
            vec![product("P-3", 2.0, 9)],
            billing.clone(),
        );

        register.resume_bill("SRV-77").await.unwrap();
        assert_eq!(register.bill_id(), "SRV-77");
        assert_eq!(register.line_count(), 2);
        assert_eq!(register.running_total(), 25.5);
        assert_eq!(register.status(), TransactionStatus::Accumulating);

        register.add_line("P-3", "3").await.unwrap();
        assert_eq!(register.running_total(), 31.5);

        register.submit().await.unwrap();
        assert!(billing.created.lock().unwrap().is_empty());
        assert_eq!(
            billing.appended.lock().unwrap().as_slice(),
            &[("SRV-77".to_string(), 1)]
        );
        assert_eq!(register.status(), TransactionStatus::Finished);
    }

    #[tokio::test]
    async fn test_resume_refused_while_bill_open() {
        let mut billing = FakeBilling::default();
        billing.on_server.insert(
            "SRV-77".to_string(),
            BillRecord {
                id: "SRV-77".to_string(),
                selling_date: None,
                list_of_products: Vec::new(),
            },
        );
        let (register, _sink) = register_with(shelf(), Arc::new(billing));

        register.add_line("P-1", "1").await.unwrap();
        let open_id = register.bill_id();

        let err = register.resume_bill("SRV-77").await.unwrap_err();
        assert!(matches!(err, WorkflowError::OpenTransaction { .. }));
        assert_eq!(register.bill_id(), open_id);
        assert_eq!(register.line_count(), 1);
    }

    #[tokio::test]
    async fn test_submit_resumed_bill_without_new_lines_fails() {
        let mut billing = FakeBilling::default();
        billing.on_server.insert(
            "SRV-77".to_string(),
            BillRecord {
                id: "SRV-77".to_string(),
                selling_date: None,
                list_of_products: vec![BillLineRecord {
                    product_id: "P-1".to_string(),
                    billed_quantity: 2,
                    counter_id: None,
                    billing_price: 10.0,
                }],
            },
        );
        let billing = Arc::new(billing);
        let (register, _sink) = register_with(Vec::new(), billing.clone());

        register.resume_bill("SRV-77").await.unwrap();
        let err = register.submit().await.unwrap_err();
        assert!(matches!(err, WorkflowError::NothingToSubmit));
        assert!(billing.appended.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_invoice_renders_and_finishes() {
        let (register, sink) = register_with(shelf(), Arc::new(FakeBilling::default()));
        register.add_line("P-1", "2").await.unwrap();
        register.add_line("P-2", "1").await.unwrap();

        let path = register.save_invoice().await.unwrap();
        assert!(path.to_string_lossy().ends_with(".txt"));
        assert_eq!(register.status(), TransactionStatus::Finished);

        let saved = sink.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        let text = saved[0].text();
        assert!(text.contains("Billing Summary"));
        assert!(text.contains("Store: S-1"));
        assert!(text.contains("Grand Total: $25.50"));
    }

    #[tokio::test]
    async fn test_save_invoice_on_empty_transaction_fails() {
        let (register, sink) = register_with(shelf(), Arc::new(FakeBilling::default()));

        let err = register.save_invoice().await.unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Core(CoreError::EmptyTransaction)
        ));
        assert!(sink.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reprint_after_submit_keeps_bill_finished() {
        let (register, sink) = register_with(shelf(), Arc::new(FakeBilling::default()));
        register.add_line("P-1", "2").await.unwrap();
        register.submit().await.unwrap();

        register.save_invoice().await.unwrap();
        register.save_invoice().await.unwrap();
        assert_eq!(sink.saved.lock().unwrap().len(), 2);
        assert_eq!(register.status(), TransactionStatus::Finished);
    }

    #[tokio::test]
    async fn test_new_bill_resets_transaction() {
        let (register, _sink) = register_with(shelf(), Arc::new(FakeBilling::default()));
        register.add_line("P-1", "2").await.unwrap();
        let old_id = register.bill_id();

        register.new_bill().unwrap();
        assert_eq!(register.status(), TransactionStatus::Empty);
        assert_eq!(register.line_count(), 0);
        assert_ne!(register.bill_id(), old_id);
    }

    #[tokio::test]
    async fn test_operation_in_flight_makes_register_busy() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let directory = Arc::new(FakeDirectory {
            products: [("P-1".to_string(), product("P-1", 10.0, 25))]
                .into_iter()
                .collect(),
            records: Vec::new(),
            lookups: AtomicUsize::new(0),
            hold: Some(Hold {
                entered: entered.clone(),
                release: release.clone(),
            }),
        });
        let billing = Arc::new(FakeBilling::default());
        let sink = Arc::new(FakeSink::default());
        let register =
            Arc::new(Register::new(context(), directory, billing, sink).unwrap());

        let background = register.clone();
        let task = tokio::spawn(async move { background.add_line("P-1", "2").await });

        entered.notified().await;
        assert!(register.is_busy());
        let err = register.submit().await.unwrap_err();
        assert!(err.is_busy());

        release.notify_one();
        let line = task.await.unwrap().unwrap();
        assert_eq!(line.quantity, 2);
        assert!(!register.is_busy());
    }

    #[tokio::test]
    async fn test_view_inventory_returns_records() {
        let mut directory = FakeDirectory::with_products(Vec::new());
        directory.records.push(InventoryRecord {
            id: "P-1".to_string(),
            name: "Hammer".to_string(),
            category: "Tools".to_string(),
            selling_price: 12.5,
            quantity: 40,
            gst: None,
        });
        let billing = Arc::new(FakeBilling::default());
        let sink = Arc::new(FakeSink::default());
        let register =
            Register::new(context(), Arc::new(directory), billing, sink).unwrap();

        let records = register.view_inventory().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "P-1");
    }
}
