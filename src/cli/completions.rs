use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    assetmount completions bash > ~/.bash_completion.d/assetmount\n\n\
                  Generate zsh completions:\n    assetmount completions zsh > ~/.zfunc/_assetmount\n\n\
                  Generate fish completions:\n    assetmount completions fish > ~/.config/fish/completions/assetmount.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
