use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the parsed expression tree as JSON
    Ast {
        #[arg(long, help = "Serialized filter string")]
        filter: String,
    },
    /// Print the parsed expression tree in its readable form
    Explain {
        #[arg(long, help = "Serialized filter string")]
        filter: String,
    },
    /// Print the part of a filter the configured backend can evaluate
    Prune {
        #[arg(long, help = "Serialized filter string")]
        filter: String,

        #[arg(long, help = "Pushdown config file path")]
        config: String,
    },
    /// Compile a filter into the configured backend's native predicate
    Compile {
        #[arg(long, help = "Serialized filter string")]
        filter: String,

        #[arg(long, help = "Pushdown config file path")]
        config: String,

        #[arg(
            long,
            help = "If specified, writes the predicate to this file instead of stdout"
        )]
        output: Option<String>,
    },
}
