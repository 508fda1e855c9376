//! Stable diagnostic codes (§6.5).
//!
//! Codes never change meaning across versions — once published, a code is
//! forever associated with the condition it names. New conditions get new
//! codes instead of reusing retired ones.

use crate::Phase;
use std::fmt;

macro_rules! error_codes_impl {
    ($($variant:ident => ($phase:expr, $code:literal)),+ $(,)?) => {
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        pub enum ErrorCode {
            $($variant,)+
        }

        impl ErrorCode {
            #[must_use]
            pub fn phase(self) -> Phase {
                match self {
                    $(ErrorCode::$variant => $phase,)+
                }
            }

            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(ErrorCode::$variant => $code,)+
                }
            }
        }
    };
}

error_codes_impl! {
    // Surface-form validator (§4.2)
    SurfaceTabCharacter      => (Phase::Surface, "SURFACE-TAB"),
    SurfaceCrLineEnding      => (Phase::Surface, "SURFACE-CRLF"),
    SurfaceTrailingWs        => (Phase::Surface, "SURFACE-TRAILING-WS"),
    SurfaceBlankLines        => (Phase::Surface, "SURFACE-BLANK-LINES"),
    SurfaceNoFinalNewline    => (Phase::Surface, "SURFACE-NO-FINAL-NEWLINE"),
    SurfaceBadFilename       => (Phase::Surface, "SURFACE-BAD-FILENAME"),
    SurfaceTestOutsideTests  => (Phase::Surface, "SURFACE-TEST-OUTSIDE-TESTS"),

    // Lexer (§4.3)
    LexUnterminatedComment   => (Phase::Lex, "LEX-UNTERMINATED-COMMENT"),
    LexUnterminatedString    => (Phase::Lex, "LEX-UNTERMINATED-STRING"),
    LexEmptyChar             => (Phase::Lex, "LEX-EMPTY-CHAR"),
    LexMultiCodepointChar    => (Phase::Lex, "LEX-MULTI-CODEPOINT-CHAR"),
    LexUnknownEscape         => (Phase::Lex, "LEX-UNKNOWN-ESCAPE"),
    LexUnterminatedChar      => (Phase::Lex, "LEX-UNTERMINATED-CHAR"),
    LexBadNumber             => (Phase::Lex, "LEX-BAD-NUMBER"),
    LexUnknownCodepoint      => (Phase::Lex, "LEX-UNKNOWN-CODEPOINT"),

    // Parser (§4.4)
    ParseUnexpectedToken     => (Phase::Parse, "PARSE-UNEXPECTED-TOKEN"),
    ParseExpectedExpr        => (Phase::Parse, "PARSE-EXPECTED-EXPR"),
    ParseMissingColon        => (Phase::Parse, "PARSE-MISSING-COLON"),
    ParseMissingArrow        => (Phase::Parse, "PARSE-MISSING-ARROW"),
    ParseUntypedConst        => (Phase::Parse, "PARSE-UNTYPED-CONST"),
    ParseUntypedLet          => (Phase::Parse, "PARSE-UNTYPED-LET"),
    ParseBadNamespacePath    => (Phase::Parse, "PARSE-BAD-NAMESPACE-PATH"),
    ParseWrongImportKeyword  => (Phase::Parse, "PARSE-WRONG-IMPORT-KEYWORD"),
    ParseUnclosedDelimiter   => (Phase::Parse, "PARSE-UNCLOSED-DELIMITER"),
    ParseExpectedIdent       => (Phase::Parse, "PARSE-EXPECTED-IDENT"),
    ParseExpectedType        => (Phase::Parse, "PARSE-EXPECTED-TYPE"),
    ParseMissingParams       => (Phase::Parse, "PARSE-MISSING-PARAMS"),
    ParseMissingBody         => (Phase::Parse, "PARSE-MISSING-BODY"),
    ParseBadFoldArity        => (Phase::Parse, "PARSE-BAD-FOLD-ARITY"),

    // Canonical-form validator (§4.5)
    CanonOrderViolation         => (Phase::Canon, "CANON-ORDER-VIOLATION"),
    CanonDuplicateDecl          => (Phase::Canon, "CANON-DUPLICATE-DECL"),
    CanonDuplicateExternMember  => (Phase::Canon, "CANON-DUPLICATE-EXTERN-MEMBER"),
    CanonUnsortedExternMembers  => (Phase::Canon, "CANON-UNSORTED-EXTERN-MEMBERS"),
    CanonDuplicateImport        => (Phase::Canon, "CANON-DUPLICATE-IMPORT"),
    CanonMissingMain            => (Phase::Canon, "CANON-MISSING-MAIN"),
    CanonUnexpectedMain         => (Phase::Canon, "CANON-UNEXPECTED-MAIN"),
    CanonBadMainSignature       => (Phase::Canon, "CANON-BAD-MAIN-SIGNATURE"),
    CanonTestOutsideTests       => (Phase::Canon, "CANON-TEST-OUTSIDE-TESTS"),
    CanonRecursionAccumulator   => (Phase::Canon, "CANON-RECURSION-ACCUMULATOR"),
    CanonRecursionCps           => (Phase::Canon, "CANON-RECURSION-CPS"),
    CanonMatchBoolean           => (Phase::Canon, "CANON-MATCH-BOOLEAN"),
    CanonDoubleWildcard         => (Phase::Canon, "CANON-DOUBLE-WILDCARD"),
    CanonDuplicateArm           => (Phase::Canon, "CANON-DUPLICATE-ARM"),
    CanonUnsortedParams         => (Phase::Canon, "CANON-UNSORTED-PARAMS"),
    CanonUnsortedEffects        => (Phase::Canon, "CANON-UNSORTED-EFFECTS"),
    CanonMissingAnnotation      => (Phase::Canon, "CANON-MISSING-ANNOTATION"),
    CanonBadFilename            => (Phase::Canon, "CANON-BAD-FILENAME"),

    // Type checker (§4.6)
    TypeUnboundName          => (Phase::Type, "TYPE-UNBOUND-NAME"),
    TypeMismatch             => (Phase::Type, "TYPE-MISMATCH"),
    TypeArityMismatch        => (Phase::Type, "TYPE-ARITY-MISMATCH"),
    TypeNonExhaustive        => (Phase::Type, "TYPE-NONEXHAUSTIVE"),
    TypeUnknownType          => (Phase::Type, "TYPE-UNKNOWN-TYPE"),
    TypeNotANamespace        => (Phase::Type, "TYPE-NOT-A-NAMESPACE"),
    TypeNotExported          => (Phase::Type, "TYPE-NOT-EXPORTED"),
    TypeUnknownCrossModule   => (Phase::Type, "TYPE-UNKNOWN-CROSS-MODULE"),
    TypeAmbiguousEmptyList   => (Phase::Type, "TYPE-AMBIGUOUS-EMPTY-LIST"),
    TypeIfBranchMismatch     => (Phase::Type, "TYPE-IF-BRANCH-MISMATCH"),
    TypeBadFieldAccess       => (Phase::Type, "TYPE-BAD-FIELD-ACCESS"),

    // Mutability checker (§4.7)
    MutAssignImmutable       => (Phase::Mutability, "MUTABILITY-ASSIGN-IMMUTABLE"),
    MutAliasing              => (Phase::Mutability, "MUTABILITY-ALIASING"),
    MutCaptureEscapes        => (Phase::Mutability, "MUTABILITY-CAPTURE-ESCAPES"),
    MutPassToImmutableParam  => (Phase::Mutability, "MUTABILITY-PASS-TO-IMMUTABLE-PARAM"),

    // Extern / mocking (§4.9)
    ExternArityMismatch       => (Phase::Extern, "EXTERN-ARITY-MISMATCH"),
    ExternUnknownMember       => (Phase::Extern, "EXTERN-UNKNOWN-MEMBER"),

    // Codegen (reserved for unreachable-state diagnostics)
    CodegenUnreachable        => (Phase::Codegen, "CODEGEN-UNREACHABLE"),

    // Runtime (surfaced back from an external runner)
    RuntimeNoPatternMatched   => (Phase::Runtime, "RUNTIME-NO-PATTERN-MATCHED"),
    RuntimeExternArityMismatch => (Phase::Runtime, "RUNTIME-EXTERN-ARITY-MISMATCH"),

    // Module graph / CLI (§4.8, §6)
    CliImportCycle            => (Phase::Cli, "CLI-IMPORT-CYCLE"),
    CliUnresolvedImport       => (Phase::Cli, "CLI-UNRESOLVED-IMPORT"),
    CliUnknownCommand         => (Phase::Cli, "CLI-UNKNOWN-COMMAND"),
    CliMissingArgument        => (Phase::Cli, "CLI-MISSING-ARGUMENT"),
    CliUnsupportedOption      => (Phase::Cli, "CLI-UNSUPPORTED-OPTION"),
    CliNoProjectMarker        => (Phase::Cli, "CLI-NO-PROJECT-MARKER"),
    CliIoError                => (Phase::Cli, "CLI-IO-ERROR"),
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
