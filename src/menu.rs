//! Menu commands

/// Every action the interactive menu offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddProduct,
    AddCustomer,
    CreateOrder,
    TotalSales,
    OrdersPerCustomer,
    AverageOrderValue,
    MostPopularCategory,
    ProductsPerCategory,
    IncreasePrices,
    Save,
    Exit,
}

impl Command {
    /// Menu order; `Exit` is listed last but selected with "0"
    pub const ALL: [Command; 11] = [
        Command::AddProduct,
        Command::AddCustomer,
        Command::CreateOrder,
        Command::TotalSales,
        Command::OrdersPerCustomer,
        Command::AverageOrderValue,
        Command::MostPopularCategory,
        Command::ProductsPerCategory,
        Command::IncreasePrices,
        Command::Save,
        Command::Exit,
    ];

    /// The number the operator types to select this command
    pub fn key(&self) -> &'static str {
        match self {
            Command::AddProduct => "1",
            Command::AddCustomer => "2",
            Command::CreateOrder => "3",
            Command::TotalSales => "4",
            Command::OrdersPerCustomer => "5",
            Command::AverageOrderValue => "6",
            Command::MostPopularCategory => "7",
            Command::ProductsPerCategory => "8",
            Command::IncreasePrices => "9",
            Command::Save => "10",
            Command::Exit => "0",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Command::AddProduct => "Add product",
            Command::AddCustomer => "Add customer",
            Command::CreateOrder => "Create order",
            Command::TotalSales => "Total sales",
            Command::OrdersPerCustomer => "Orders per customer",
            Command::AverageOrderValue => "Average order value",
            Command::MostPopularCategory => "Most popular category",
            Command::ProductsPerCategory => "Products per category",
            Command::IncreasePrices => "Increase smartphone prices by 10%",
            Command::Save => "Save changes to the database",
            Command::Exit => "Exit",
        }
    }

    /// Parses a menu choice.
    ///
    /// Surrounding whitespace is trimmed, then the choice must equal a key exactly.
    pub fn parse(input: &str) -> Option<Self> {
        let choice = input.trim();
        Self::ALL.into_iter().find(|c| c.key() == choice)
    }

    /// Whether the command changes stored data
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Command::AddProduct
                | Command::AddCustomer
                | Command::CreateOrder
                | Command::IncreasePrices
        )
    }
}

/// The full menu text, one command per line
pub fn render_menu() -> String {
    let mut output = String::from("\n--- MENU ---\n");
    for command in Command::ALL {
        output.push_str(&format!("{}. {}\n", command.key(), command.label()));
    }
    output
}
