use unsynn::*;

keyword! {
    KFn = "fn";
}

unsynn! {
    // attributes, visibility and qualifiers before `fn`
    struct Preamble {
        items: Any<Cons<Except<KFn>, TokenTree>>,
    }

    // generics and arguments between the name and the body
    struct Signature {
        items: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct Body {
        items: BraceGroup,
    }

    struct TestFn {
        preamble: Preamble, _fn: KFn, name: Ident,
        signature: Signature, body: Body
    }
}

impl quote::ToTokens for Preamble {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        self.items.to_tokens(tokens)
    }
}

impl quote::ToTokens for Signature {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        self.items.to_tokens(tokens)
    }
}

impl quote::ToTokens for Body {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        tokens.extend(self.items.0.stream())
    }
}

/// Whether the tokens between a test's name and its body include `->`.
///
/// Arguments sit inside a parenthesized group, so only a return type shows up
/// at this level.
fn declares_return_type(signature: &TokenStream) -> bool {
    let mut after_minus = false;
    for tt in signature.clone() {
        match tt {
            TokenTree::Punct(punct) if after_minus && punct.as_char() == '>' => return true,
            TokenTree::Punct(punct) => {
                after_minus = punct.as_char() == '-' && punct.spacing() == Spacing::Joint;
            }
            _ => after_minus = false,
        }
    }
    false
}

/// Marks a test whose body may use `?`.
///
/// The function gets an `eyre::Result<()>` return type, and runs
/// `partial_testhelpers::setup_for` with its own path before the body. A
/// function that already declares a return type is rejected.
#[proc_macro_attribute]
pub fn test(
    _attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = TokenStream::from(item);
    let mut tokens = item.to_token_iter();
    let test_fn = match tokens.parse::<TestFn>() {
        Ok(test_fn) => test_fn,
        Err(err) => panic!("#[partial_testhelpers::test] expects a function: {err:?}"),
    };

    let TestFn {
        preamble,
        _fn,
        name,
        signature,
        body,
    } = test_fn;

    if declares_return_type(&quote::ToTokens::to_token_stream(&signature)) {
        return quote::quote! {
            compile_error!(concat!(
                "#[partial_testhelpers::test] provides the return type of `",
                stringify!(#name),
                "`; remove the `-> ...`",
            ));
        }
        .into();
    }

    quote::quote! {
        #[::core::prelude::rust_2024::test]
        #preamble fn #name #signature -> ::partial_testhelpers::eyre::Result<()> {
            ::partial_testhelpers::setup_for(concat!(module_path!(), "::", stringify!(#name)));

            #body

            Ok(())
        }
    }
    .into()
}
