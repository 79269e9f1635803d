//! `cileles chat`: Interactive or single-message assistant mode.

use cileles_core::{AnswerSource, ChatExchange};
use cileles_providers::{AssistantSession, build_assistant};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(
    data: Option<PathBuf>,
    message: Option<String>,
    target: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(data)?;
    if let Some(target) = target {
        config.assistant.target = target.parse()?;
    }

    let mut session = AssistantSession::new(build_assistant(&config)?);

    if let Some(msg) = message {
        // Single message mode
        eprint!("  Thinking...");
        let exchange = session.send(&msg).await.cloned();
        eprint!("\r              \r");
        match exchange {
            Some(exchange) => println!("{}", exchange.response),
            None => return Err("Message is empty".into()),
        }
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║     Asisten Kualitas Air Cileles, Jatinangor  ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Backend:   {}", session.assistant().backend_name());
    println!("  Target:    {:?}", config.assistant.target);
    println!();
    println!("  Halo! Tanyakan tentang pH, TDS, EC, atau stasiun pemantauan.");
    println!("  Type 'exit' or Ctrl+D to quit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("  Anda > ");
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if matches!(line, "exit" | "quit" | "/exit" | "/quit" | ":q") {
            break;
        }

        eprint!("  ...");
        if let Some(exchange) = session.send(line).await {
            eprint!("\r     \r");
            print_exchange(exchange);
        } else {
            eprint!("\r     \r");
        }

        print!("  Anda > ");
        std::io::stdout().flush()?;
    }

    println!();
    println!(
        "  {} pertanyaan dijawab. Sampai jumpa! 👋",
        session.transcript().len()
    );
    println!();

    Ok(())
}

fn print_exchange(exchange: &ChatExchange) {
    println!();
    let prefix = match exchange.source {
        AnswerSource::Live => "Asisten",
        AnswerSource::Offline => "Asisten (offline)",
        AnswerSource::Failed(_) => "Asisten [!]",
    };
    for line in exchange.response.lines() {
        println!("  {prefix} > {line}");
    }
    println!();
}
