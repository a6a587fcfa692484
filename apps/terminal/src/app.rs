//! # Command Loop
//!
//! The interactive shell the counter operator works in. One command per
//! line; onboarding commands go through [`anvil_register::setup`], billing
//! commands through a [`Register`] built after login (or restored from the
//! saved session file).
//!
//! ```text
//! anvil> add P-100 2
//! ✓ P-100 x2 @ $10.00 = $20.00   (running total $20.00)
//! anvil> submit
//! ✓ Bill submitted. Server id: 64a1...
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anvil_core::pricing::format_amount;
use anvil_gateway::GatewayClient;
use anvil_register::{csv_import, setup, FsDocumentSink, Register, SessionContext};

use crate::error::{ErrorCode, UserError};

// ===== Terminal =====

/// Interactive terminal session.
///
/// Holds the shared gateway client and, once a session context exists,
/// the register that runs the billing loop.
pub struct Terminal {
    gateway: Arc<GatewayClient>,
    session_path: Option<PathBuf>,
    register: Option<Arc<Register>>,
    /// (enterprise id, enterprise name) from a signup in this run, offered
    /// as the default at the next login.
    pending_signup: Option<(String, String)>,
}

impl Terminal {
    pub fn new(gateway: Arc<GatewayClient>, session_path: Option<PathBuf>) -> Self {
        Terminal {
            gateway,
            session_path,
            register: None,
            pending_signup: None,
        }
    }

    /// Runs the command loop until `quit` or end of input.
    pub async fn run(&mut self) -> Result<(), UserError> {
        println!("Anvil POS Terminal");
        println!("==================");

        match SessionContext::load(self.session_path.clone()) {
            Ok(context) => {
                if let Some(token) = &context.token {
                    self.gateway.set_token(token.clone()).await;
                }
                println!(
                    "✓ Session: enterprise {} / store {} / counter {}",
                    context.enterprise_id, context.store_id, context.counter_id
                );
                self.register = Some(self.build_register(context)?);
            }
            Err(err) if err.is_missing_context() => {
                println!("No saved session. Run 'signup' or 'login' to begin.");
            }
            Err(err) => return Err(err.into()),
        }
        println!("Type 'help' for commands.");
        println!();

        loop {
            let Some(line) = read_prompt("anvil> ")? else {
                break;
            };
            let parts: Vec<&str> = line.split_whitespace().collect();
            let outcome = match parts.as_slice() {
                [] => continue,
                ["quit"] | ["exit"] => break,
                ["help"] => {
                    print_help();
                    Ok(())
                }
                ["signup"] => self.signup().await,
                ["login"] => self.login().await,
                ["addstore"] => self.add_store().await,
                ["addproduct"] => self.add_product().await,
                ["inventory"] => self.show_inventory().await,
                ["import", path] => self.import_stock(path).await,
                ["import"] => usage("import <file.csv>"),
                ["add", product_id, quantity] => self.add_line(product_id, quantity).await,
                ["add", ..] => usage("add <productId> <quantity>"),
                ["resume", billing_id] => self.resume(billing_id).await,
                ["resume"] => usage("resume <billingId>"),
                ["total"] => self.show_total(),
                ["lines"] => self.show_lines(),
                ["submit"] => self.submit().await,
                ["invoice"] => self.save_invoice().await,
                ["new"] => self.new_bill(),
                ["status"] => self.show_status(),
                _ => {
                    println!("Unrecognized command. Type 'help'.");
                    Ok(())
                }
            };
            if let Err(err) = outcome {
                println!("✗ {err}");
            }
        }

        println!("Goodbye.");
        Ok(())
    }

    // ===== Session Wiring =====

    fn register(&self) -> Result<&Arc<Register>, UserError> {
        self.register.as_ref().ok_or_else(|| {
            UserError::new(ErrorCode::MissingContext, "No session. Run 'login' first.")
        })
    }

    fn build_register(&self, context: SessionContext) -> Result<Arc<Register>, UserError> {
        let documents = Arc::new(FsDocumentSink::default_sink()?);
        let register = Register::new(
            context,
            self.gateway.clone(),
            self.gateway.clone(),
            documents,
        )?;
        Ok(Arc::new(register))
    }

    // ===== Onboarding Commands =====

    async fn signup(&mut self) -> Result<(), UserError> {
        let name = prompt("Enterprise name: ")?;
        let password = prompt("Password: ")?;
        let store_count = prompt_number("Number of stores: ")?;

        let mut layouts = Vec::new();
        for index in 1..=store_count {
            let billing = prompt_number(&format!("Store {index} billing counters: "))?;
            let inventory = prompt_number(&format!("Store {index} inventory counters: "))?;
            layouts.push((billing, inventory));
        }

        let response = setup::register_enterprise(&self.gateway, &name, &password, &layouts).await?;
        println!("✓ Enterprise registered. Enterprise id: {}", response.ent_id);
        println!("  Keep it safe; it is your login id. Run 'login' to continue.");
        self.pending_signup = Some((response.ent_id, name));
        Ok(())
    }

    async fn login(&mut self) -> Result<(), UserError> {
        let (ent_id, enterprise_name) = match &self.pending_signup {
            Some((pending_id, pending_name)) => {
                let entered = prompt(&format!("Enterprise id [{pending_id}]: "))?;
                if entered.is_empty() {
                    (pending_id.clone(), pending_name.clone())
                } else {
                    (entered, String::new())
                }
            }
            None => (prompt("Enterprise id: ")?, String::new()),
        };
        let password = prompt("Password: ")?;
        let response = setup::login(&self.gateway, &ent_id, &password).await?;
        println!("✓ {}", response.message);

        let store_id = prompt("Store id: ")?;
        let counter_id = prompt("Counter id: ")?;
        let mut context = SessionContext::new(ent_id, store_id, counter_id);
        context.enterprise_name = enterprise_name;
        context.token = Some(response.token);
        context.validate()?;
        context.save(self.session_path.clone())?;

        self.register = Some(self.build_register(context)?);
        self.pending_signup = None;
        println!("✓ Session saved. Ready to bill.");
        Ok(())
    }

    async fn add_store(&self) -> Result<(), UserError> {
        let billing = prompt_number("Billing counters: ")?;
        let inventory = prompt_number("Inventory counters: ")?;
        setup::add_store(&self.gateway, billing, inventory).await?;
        println!("✓ Store added.");
        Ok(())
    }

    async fn add_product(&self) -> Result<(), UserError> {
        let enterprise_id = self.register()?.context().enterprise_id.clone();
        let name = prompt("Product name: ")?;
        let category = prompt("Category: ")?;
        let description = prompt("Description: ")?;
        setup::add_product(&self.gateway, &enterprise_id, &name, &category, &description).await?;
        println!("✓ Product registered.");
        Ok(())
    }

    // ===== Inventory Commands =====

    async fn show_inventory(&self) -> Result<(), UserError> {
        let records = self.register()?.view_inventory().await?;
        if records.is_empty() {
            println!("Inventory is empty.");
            return Ok(());
        }
        println!(
            "{:<14} {:<24} {:<14} {:>10} {:>7} {:>6}",
            "ID", "NAME", "CATEGORY", "PRICE", "STOCK", "GST%"
        );
        for record in &records {
            let gst = record
                .gst
                .map_or_else(|| "-".to_string(), |rate| format!("{rate}"));
            println!(
                "{:<14} {:<24} {:<14} {:>10} {:>7} {:>6}",
                record.id,
                record.name,
                record.category,
                format_amount(record.selling_price),
                record.quantity,
                gst,
            );
        }
        Ok(())
    }

    async fn import_stock(&self, path: &str) -> Result<(), UserError> {
        let batch = csv_import::load_import_file(path)?;
        if !batch.is_clean() {
            println!("✗ Import rejected. Fix these rows and retry:");
            for failure in batch.failures() {
                println!(
                    "  row {:>3}  {:<16} {}",
                    failure.row, failure.field, failure.message
                );
            }
            return Ok(());
        }
        let applied = csv_import::submit_import(&self.gateway, &batch).await?;
        println!("✓ {applied} stock rows applied.");
        Ok(())
    }

    // ===== Billing Commands =====

    async fn add_line(&self, product_id: &str, quantity: &str) -> Result<(), UserError> {
        let register = self.register()?;
        let line = register.add_line(product_id, quantity).await?;
        println!(
            "✓ {} x{} @ {} = {}   (running total {})",
            line.product_id,
            line.quantity,
            format_amount(line.unit_price),
            format_amount(line.line_total),
            format_amount(register.running_total()),
        );
        Ok(())
    }

    async fn resume(&self, billing_id: &str) -> Result<(), UserError> {
        let register = self.register()?;
        register.resume_bill(billing_id).await?;
        println!(
            "✓ Resumed bill {} with {} lines, total {}.",
            register.bill_id(),
            register.line_count(),
            format_amount(register.running_total()),
        );
        Ok(())
    }

    fn show_total(&self) -> Result<(), UserError> {
        let register = self.register()?;
        println!(
            "Bill {}: {} lines, total {}",
            register.bill_id(),
            register.line_count(),
            format_amount(register.running_total()),
        );
        Ok(())
    }

    fn show_lines(&self) -> Result<(), UserError> {
        let register = self.register()?;
        let lines = register.lines();
        if lines.is_empty() {
            println!("No lines yet.");
            return Ok(());
        }
        for (index, line) in lines.iter().enumerate() {
            println!(
                "{:>3}. {} x{} @ {} = {}",
                index + 1,
                line.product_id,
                line.quantity,
                format_amount(line.unit_price),
                format_amount(line.line_total),
            );
        }
        println!("Total: {}", format_amount(register.running_total()));
        Ok(())
    }

    async fn submit(&self) -> Result<(), UserError> {
        let record = self.register()?.submit().await?;
        println!("✓ Bill submitted. Server id: {}", record.id);
        Ok(())
    }

    async fn save_invoice(&self) -> Result<(), UserError> {
        let path = self.register()?.save_invoice().await?;
        println!("✓ Invoice saved to {}", path.display());
        Ok(())
    }

    fn new_bill(&self) -> Result<(), UserError> {
        let register = self.register()?;
        register.new_bill()?;
        println!("✓ New bill started: {}", register.bill_id());
        Ok(())
    }

    fn show_status(&self) -> Result<(), UserError> {
        match &self.register {
            Some(register) => {
                let context = register.context();
                println!("Enterprise: {}", context.enterprise_id);
                println!("Store:      {}", context.store_id);
                println!("Counter:    {}", context.counter_id);
                println!(
                    "Bill {}: {:?}, {} lines, total {}",
                    register.bill_id(),
                    register.status(),
                    register.line_count(),
                    format_amount(register.running_total()),
                );
            }
            None => println!("No session. Run 'login' first."),
        }
        Ok(())
    }
}

// ===== Prompt Helpers =====

/// Prints a prompt and reads one trimmed line. `None` means end of input.
fn read_prompt(label: &str) -> Result<Option<String>, UserError> {
    print!("{label}");
    io::stdout().flush()?;
    let mut buffer = String::new();
    if io::stdin().read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer.trim().to_string()))
}

/// Like [`read_prompt`] but end of input mid-command is an error.
fn prompt(label: &str) -> Result<String, UserError> {
    match read_prompt(label)? {
        Some(line) => Ok(line),
        None => Err(UserError::new(ErrorCode::InputError, "Input closed")),
    }
}

fn prompt_number(label: &str) -> Result<u32, UserError> {
    prompt(label)?
        .parse()
        .map_err(|_| UserError::invalid("Enter a whole number"))
}

fn usage(text: &str) -> Result<(), UserError> {
    println!("Usage: {text}");
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  Onboarding");
    println!("    signup                   Register a new enterprise");
    println!("    login                    Log in and pick a store/counter");
    println!("    addstore                 Add a store to the enterprise");
    println!("    addproduct               Register a product in the catalog");
    println!("  Inventory");
    println!("    inventory                List the store inventory");
    println!("    import <file.csv>        Bulk stock update from a CSV file");
    println!("  Billing");
    println!("    add <productId> <qty>    Add a line to the current bill");
    println!("    resume <billingId>       Continue an existing bill");
    println!("    lines                    Show the current bill lines");
    println!("    total                    Show the running total");
    println!("    submit                   Send the bill to the server");
    println!("    invoice                  Render and save the invoice");
    println!("    new                      Start the next bill");
    println!("  Other");
    println!("    status                   Show session and bill state");
    println!("    help                     Show this message");
    println!("    quit                     Exit");
}
