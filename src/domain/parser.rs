//! Expression parser for field formulas.
//!
//! This module implements a recursive descent parser for the constrained
//! arithmetic grammar accepted by formula fields. It replaces the dynamic
//! evaluation a host runtime would offer with an explicit tokenizer and AST
//! walk, so syntax errors are classified deterministically instead of
//! depending on a runtime's exception messages.
//!
//! # BNF Grammar
//!
//! ```bnf
//! Expression     ::= Addition
//! Addition       ::= Multiplication ( ( "+" | "-" ) Multiplication )*
//! Multiplication ::= Unary ( ( "*" | "/" ) Unary )*
//! Unary          ::= ( "+" | "-" ) Unary | Primary
//! Primary        ::= Number | "(" Expression ")"
//! Number         ::= [0-9]+ ( "." [0-9]* )? | "." [0-9]+
//! ```
//!
//! This grammar gives conventional precedence and associativity:
//! - Addition and subtraction bind loosest, left-to-right
//! - Multiplication and division bind tighter, left-to-right
//! - Unary plus/minus and parentheses bind tightest

/// Represents a token in the expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),

    // Operators
    Plus,
    Minus,
    Multiply,
    Divide,

    // Delimiters
    LeftParen,
    RightParen,

    // End of input
    Eof,
}

/// Represents an Abstract Syntax Tree node for expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),

    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
    },

    Unary {
        operator: UnaryOp,
        operand: Box<Expr>,
    },
}

/// Binary operators supported by field formulas.
#[derive(Debug, Clone, PartialEq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Unary operators.
#[derive(Debug, Clone, PartialEq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

/// Lexical analyzer for tokenizing expressions.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    current_char: Option<char>,
}

impl Lexer {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let current_char = chars.first().copied();

        Self {
            input: chars,
            position: 0,
            current_char,
        }
    }

    /// Advances to the next character in the input.
    fn advance(&mut self) {
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Reads a number token (integer or decimal, optionally starting with '.').
    fn read_number(&mut self) -> Result<f64, String> {
        let mut number_str = String::new();

        // Read integer part
        while let Some(ch) = self.current_char {
            if ch.is_ascii_digit() {
                number_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // Read decimal part if present
        if self.current_char == Some('.') {
            number_str.push('.');
            self.advance();

            while let Some(ch) = self.current_char {
                if ch.is_ascii_digit() {
                    number_str.push(ch);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        number_str.parse::<f64>()
            .map_err(|_| format!("Invalid number: {}", number_str))
    }

    /// Gets the next token from the input.
    pub fn next_token(&mut self) -> Result<Token, String> {
        self.skip_whitespace();

        match self.current_char {
            None => Ok(Token::Eof),

            Some(ch) => match ch {
                // Numbers, including a leading decimal point (".5")
                '0'..='9' | '.' => {
                    let number = self.read_number()?;
                    Ok(Token::Number(number))
                }

                '+' => {
                    self.advance();
                    Ok(Token::Plus)
                }

                '-' => {
                    self.advance();
                    Ok(Token::Minus)
                }

                '*' => {
                    self.advance();
                    Ok(Token::Multiply)
                }

                '/' => {
                    self.advance();
                    Ok(Token::Divide)
                }

                '(' => {
                    self.advance();
                    Ok(Token::LeftParen)
                }

                ')' => {
                    self.advance();
                    Ok(Token::RightParen)
                }

                _ => Err(format!("Unexpected character: '{}'", ch)),
            }
        }
    }
}

/// Recursive descent parser for field formula expressions.
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
}

impl Parser {
    /// Creates a new parser for the given expression.
    pub fn new(input: &str) -> Result<Self, String> {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token()?;

        Ok(Self {
            lexer,
            current_token,
        })
    }

    /// Advances to the next token.
    fn advance(&mut self) -> Result<(), String> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    /// Checks if the current token matches the expected token and advances.
    fn expect(&mut self, expected: Token) -> Result<(), String> {
        if std::mem::discriminant(&self.current_token) == std::mem::discriminant(&expected) {
            self.advance()
        } else {
            Err(format!("Expected {:?}, found {:?}", expected, self.current_token))
        }
    }

    /// Parses the top-level expression.
    pub fn parse(&mut self) -> Result<Expr, String> {
        let expr = self.parse_addition()?;

        if self.current_token != Token::Eof {
            return Err(format!("Unexpected token at end: {:?}", self.current_token));
        }

        Ok(expr)
    }

    /// Parses addition and subtraction expressions.
    fn parse_addition(&mut self) -> Result<Expr, String> {
        let mut left = self.parse_multiplication()?;

        while matches!(self.current_token, Token::Plus | Token::Minus) {
            let op = match self.current_token {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Subtract,
                _ => unreachable!(),
            };
            self.advance()?;
            let right = self.parse_multiplication()?;
            left = Expr::Binary {
                left: Box::new(left),
                operator: op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parses multiplication and division expressions.
    fn parse_multiplication(&mut self) -> Result<Expr, String> {
        let mut left = self.parse_unary()?;

        while matches!(self.current_token, Token::Multiply | Token::Divide) {
            let op = match self.current_token {
                Token::Multiply => BinaryOp::Multiply,
                Token::Divide => BinaryOp::Divide,
                _ => unreachable!(),
            };
            self.advance()?;
            let right = self.parse_unary()?;
            left = Expr::Binary {
                left: Box::new(left),
                operator: op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parses unary expressions.
    fn parse_unary(&mut self) -> Result<Expr, String> {
        match self.current_token {
            Token::Plus => {
                self.advance()?;
                let operand = self.parse_unary()?;
                Ok(Expr::Unary {
                    operator: UnaryOp::Plus,
                    operand: Box::new(operand),
                })
            }
            Token::Minus => {
                self.advance()?;
                let operand = self.parse_unary()?;
                Ok(Expr::Unary {
                    operator: UnaryOp::Minus,
                    operand: Box::new(operand),
                })
            }
            _ => self.parse_primary(),
        }
    }

    /// Parses primary expressions (highest precedence).
    fn parse_primary(&mut self) -> Result<Expr, String> {
        match &self.current_token {
            Token::Number(value) => {
                let value = *value;
                self.advance()?;
                Ok(Expr::Number(value))
            }

            Token::LeftParen => {
                self.advance()?;
                let expr = self.parse_addition()?;
                self.expect(Token::RightParen)?;
                Ok(expr)
            }

            _ => Err(format!("Unexpected token: {:?}", self.current_token)),
        }
    }
}

/// Expression evaluator that walks the AST and computes results.
pub struct ExpressionEvaluator;

impl ExpressionEvaluator {
    /// Evaluates an expression AST to a numeric result.
    pub fn evaluate(expr: &Expr) -> Result<f64, String> {
        match expr {
            Expr::Number(value) => Ok(*value),

            Expr::Binary { left, operator, right } => {
                let left_val = Self::evaluate(left)?;
                let right_val = Self::evaluate(right)?;

                match operator {
                    BinaryOp::Add => Ok(left_val + right_val),
                    BinaryOp::Subtract => Ok(left_val - right_val),
                    BinaryOp::Multiply => Ok(left_val * right_val),
                    BinaryOp::Divide => {
                        if right_val == 0.0 {
                            Err("Division by zero".to_string())
                        } else {
                            Ok(left_val / right_val)
                        }
                    }
                }
            }

            Expr::Unary { operator, operand } => {
                let operand_val = Self::evaluate(operand)?;

                match operator {
                    UnaryOp::Plus => Ok(operand_val),
                    UnaryOp::Minus => Ok(-operand_val),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_numbers() {
        let mut lexer = Lexer::new("42 3.14 0.5 .5");

        assert_eq!(lexer.next_token().unwrap(), Token::Number(42.0));
        assert_eq!(lexer.next_token().unwrap(), Token::Number(3.14));
        assert_eq!(lexer.next_token().unwrap(), Token::Number(0.5));
        assert_eq!(lexer.next_token().unwrap(), Token::Number(0.5));
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }

    #[test]
    fn test_lexer_operators() {
        let mut lexer = Lexer::new("+ - * /");

        assert_eq!(lexer.next_token().unwrap(), Token::Plus);
        assert_eq!(lexer.next_token().unwrap(), Token::Minus);
        assert_eq!(lexer.next_token().unwrap(), Token::Multiply);
        assert_eq!(lexer.next_token().unwrap(), Token::Divide);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }

    #[test]
    fn test_lexer_delimiters() {
        let mut lexer = Lexer::new("( )");

        assert_eq!(lexer.next_token().unwrap(), Token::LeftParen);
        assert_eq!(lexer.next_token().unwrap(), Token::RightParen);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }

    #[test]
    fn test_lexer_rejects_unknown_characters() {
        let mut lexer = Lexer::new("@");
        assert!(lexer.next_token().is_err());

        let mut lexer = Lexer::new("a");
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn test_lexer_bare_decimal_point_is_invalid() {
        let mut lexer = Lexer::new(".");
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn test_parser_numbers() {
        let mut parser = Parser::new("42").unwrap();
        let expr = parser.parse().unwrap();
        assert_eq!(expr, Expr::Number(42.0));

        let mut parser = Parser::new("3.14").unwrap();
        let expr = parser.parse().unwrap();
        assert_eq!(expr, Expr::Number(3.14));
    }

    #[test]
    fn test_parser_binary_operations() {
        let mut parser = Parser::new("2 + 3").unwrap();
        let expr = parser.parse().unwrap();
        match expr {
            Expr::Binary { left, operator, right } => {
                assert!(matches!(left.as_ref(), &Expr::Number(2.0)));
                assert_eq!(operator, BinaryOp::Add);
                assert!(matches!(right.as_ref(), &Expr::Number(3.0)));
            }
            _ => panic!("Expected binary expression"),
        }
    }

    #[test]
    fn test_parser_operator_precedence() {
        // 2 + 3 * 4 must parse as 2 + (3 * 4)
        let mut parser = Parser::new("2 + 3 * 4").unwrap();
        let expr = parser.parse().unwrap();
        match expr {
            Expr::Binary { left, operator: BinaryOp::Add, right } => {
                assert!(matches!(left.as_ref(), &Expr::Number(2.0)));
                match right.as_ref() {
                    Expr::Binary { left: mult_left, operator: BinaryOp::Multiply, right: mult_right } => {
                        assert!(matches!(mult_left.as_ref(), &Expr::Number(3.0)));
                        assert!(matches!(mult_right.as_ref(), &Expr::Number(4.0)));
                    }
                    _ => panic!("Expected multiplication as right operand"),
                }
            }
            _ => panic!("Expected addition at top level"),
        }
    }

    #[test]
    fn test_parser_left_associativity() {
        // 10 - 3 - 2 must parse as (10 - 3) - 2
        let mut parser = Parser::new("10 - 3 - 2").unwrap();
        let expr = parser.parse().unwrap();
        match expr {
            Expr::Binary { left, operator: BinaryOp::Subtract, right } => {
                assert!(matches!(right.as_ref(), &Expr::Number(2.0)));
                match left.as_ref() {
                    Expr::Binary { operator: BinaryOp::Subtract, .. } => {}
                    _ => panic!("Expected subtraction as left operand"),
                }
            }
            _ => panic!("Expected subtraction at top level"),
        }
        assert_eq!(ExpressionEvaluator::evaluate(&parser_parse("10-3-2")).unwrap(), 5.0);
    }

    #[test]
    fn test_parser_unary_operations() {
        let mut parser = Parser::new("-5").unwrap();
        let expr = parser.parse().unwrap();
        match expr {
            Expr::Unary { operator, operand } => {
                assert_eq!(operator, UnaryOp::Minus);
                assert!(matches!(operand.as_ref(), &Expr::Number(5.0)));
            }
            _ => panic!("Expected unary expression"),
        }
    }

    #[test]
    fn test_parser_parentheses() {
        let mut parser = Parser::new("(2 + 3) * 4").unwrap();
        let expr = parser.parse().unwrap();
        match expr {
            Expr::Binary { left, operator: BinaryOp::Multiply, right } => {
                match left.as_ref() {
                    Expr::Binary { left: add_left, operator: BinaryOp::Add, right: add_right } => {
                        assert!(matches!(add_left.as_ref(), &Expr::Number(2.0)));
                        assert!(matches!(add_right.as_ref(), &Expr::Number(3.0)));
                    }
                    _ => panic!("Expected addition in parentheses"),
                }
                assert!(matches!(right.as_ref(), &Expr::Number(4.0)));
            }
            _ => panic!("Expected multiplication at top level"),
        }
    }

    fn parser_parse(input: &str) -> Expr {
        Parser::new(input).unwrap().parse().unwrap()
    }

    #[test]
    fn test_evaluator_arithmetic() {
        assert_eq!(ExpressionEvaluator::evaluate(&parser_parse("2+3")).unwrap(), 5.0);
        assert_eq!(ExpressionEvaluator::evaluate(&parser_parse("10-3")).unwrap(), 7.0);
        assert_eq!(ExpressionEvaluator::evaluate(&parser_parse("4*5")).unwrap(), 20.0);
        assert_eq!(ExpressionEvaluator::evaluate(&parser_parse("15/3")).unwrap(), 5.0);
        assert_eq!(ExpressionEvaluator::evaluate(&parser_parse("2+3*4")).unwrap(), 14.0);
        assert_eq!(ExpressionEvaluator::evaluate(&parser_parse("(2+3)*4")).unwrap(), 20.0);
    }

    #[test]
    fn test_evaluator_unary_minus() {
        assert_eq!(ExpressionEvaluator::evaluate(&parser_parse("-5")).unwrap(), -5.0);
        assert_eq!(ExpressionEvaluator::evaluate(&parser_parse("-5+10")).unwrap(), 5.0);
        assert_eq!(ExpressionEvaluator::evaluate(&parser_parse("2*-3")).unwrap(), -6.0);
        assert_eq!(ExpressionEvaluator::evaluate(&parser_parse("-(2+3)")).unwrap(), -5.0);
    }

    #[test]
    fn test_evaluator_division_by_zero() {
        assert!(ExpressionEvaluator::evaluate(&parser_parse("5/0")).is_err());
        assert!(ExpressionEvaluator::evaluate(&parser_parse("1/(2-2)")).is_err());
    }

    #[test]
    fn test_parser_error_handling() {
        // Dangling operator
        let mut parser = Parser::new("2 +").unwrap();
        assert!(parser.parse().is_err());

        // Mismatched parentheses
        let mut parser = Parser::new("(2 + 3").unwrap();
        assert!(parser.parse().is_err());

        // Empty expression
        let mut parser = Parser::new("").unwrap();
        assert!(parser.parse().is_err());

        // Adjacent numbers with nothing joining them
        let mut parser = Parser::new("2 3").unwrap();
        assert!(parser.parse().is_err());
    }

    #[test]
    fn test_parser_rejects_trailing_garbage() {
        let mut parser = Parser::new("2+3)").unwrap();
        assert!(parser.parse().is_err());
    }
}
