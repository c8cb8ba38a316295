//! Logic signatures: program-based spending conditions.
//!
//! A logic signature authorizes a transaction in one of three ways:
//! - the program itself *is* the account (its tagged hash equals the
//!   sender's public key),
//! - a participant signed the tagged program bytes directly, or
//! - a multisig account signed the tagged program bytes.

use crate::error::TransactionError;
use crate::transaction::Transaction;
use lumen_crypto::{digest, encode_address, sign_message, verify_signature};
use lumen_encoding::{encode, Value};
use lumen_multisig::{MultisigPreimage, MultisigSignature};
use lumen_types::{tags, PublicKey, SecretKey, Signature};

/// A logic signature: a program, its arguments, and an optional direct or
/// multisig signature over the tagged program bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicSig {
    pub program: Vec<u8>,
    pub args: Vec<Vec<u8>>,
    pub sig: Option<Signature>,
    pub msig: Option<MultisigSignature>,
}

impl LogicSig {
    /// Create an unsigned logic signature from a program and its arguments.
    ///
    /// An empty program is malformed: it has no hash-derived account and
    /// nothing to sign.
    pub fn new(program: Vec<u8>, args: Vec<Vec<u8>>) -> Result<Self, TransactionError> {
        if program.is_empty() {
            return Err(TransactionError::MalformedRecord(
                "logic signature program must not be empty".to_string(),
            ));
        }
        Ok(Self {
            program,
            args,
            sig: None,
            msig: None,
        })
    }

    /// The tagged program bytes every authorization mode signs or hashes.
    pub fn tagged_program(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(tags::PROGRAM.len() + self.program.len());
        bytes.extend_from_slice(tags::PROGRAM);
        bytes.extend_from_slice(&self.program);
        bytes
    }

    /// The program's hash-derived account identity.
    pub fn program_key(&self) -> PublicKey {
        PublicKey(digest(&self.tagged_program()))
    }

    /// The program account's text address.
    pub fn address(&self) -> String {
        encode_address(&self.program_key())
    }

    /// Attach a direct signature over the tagged program bytes.
    pub fn sign(&mut self, secret: &SecretKey) {
        self.sig = Some(sign_message(&self.tagged_program(), secret));
        self.msig = None;
    }

    /// Start a multisig authorization: sign the tagged program bytes as one
    /// participant of `preimage`.
    pub fn sign_multisig(
        &mut self,
        preimage: &MultisigPreimage,
        secret: &SecretKey,
    ) -> Result<(), TransactionError> {
        let msig = MultisigSignature::partial(preimage, &self.tagged_program(), secret)?;
        self.msig = Some(msig);
        self.sig = None;
        Ok(())
    }

    /// Add another participant's signature to an existing multisig
    /// authorization.
    pub fn append_to_multisig(&mut self, secret: &SecretKey) -> Result<(), TransactionError> {
        let tagged = self.tagged_program();
        let msig = self.msig.as_mut().ok_or_else(|| {
            TransactionError::MalformedRecord(
                "no multisig authorization to append to".to_string(),
            )
        })?;
        msig.append(&tagged, secret)?;
        Ok(())
    }

    /// Check whether this logic signature authorizes spending from the
    /// account `expected`.
    pub fn verify(&self, expected: &PublicKey) -> bool {
        if self.program.is_empty() {
            return false;
        }
        let tagged = self.tagged_program();
        match (&self.sig, &self.msig) {
            (None, None) => self.program_key() == *expected,
            (Some(sig), None) => verify_signature(&tagged, sig, expected),
            (None, Some(msig)) => msig.verify(&tagged, expected),
            (Some(_), Some(_)) => false,
        }
    }

    /// The canonical record form: `{arg, l, msig?, sig?}`.
    pub fn to_value(&self) -> Value {
        let args: Vec<Value> = self.args.iter().map(|a| Value::bytes(a.clone())).collect();
        let mut entries = vec![
            ("arg", Value::Array(args)),
            ("l", Value::bytes(self.program.clone())),
        ];
        if let Some(msig) = &self.msig {
            entries.push(("msig", msig.to_value()));
        }
        if let Some(sig) = &self.sig {
            entries.push(("sig", Value::bytes(sig.as_bytes().to_vec())));
        }
        Value::map(entries)
    }

    /// Rebuild from a decoded record.
    pub fn from_value(value: &Value) -> Result<Self, TransactionError> {
        let malformed = |what: &str| TransactionError::MalformedRecord(what.to_string());

        let program = value
            .get("l")
            .and_then(Value::as_bytes)
            .ok_or_else(|| malformed("missing program"))?
            .to_vec();

        let args = match value.get("arg") {
            None => Vec::new(),
            Some(v) => v
                .as_array()
                .ok_or_else(|| malformed("arguments must be an array"))?
                .iter()
                .map(|a| {
                    a.as_bytes()
                        .map(<[u8]>::to_vec)
                        .ok_or_else(|| malformed("argument must be a byte string"))
                })
                .collect::<Result<_, _>>()?,
        };

        let sig = match value.get("sig") {
            None => None,
            Some(v) => {
                let bytes: [u8; 64] = v
                    .as_bytes()
                    .and_then(|b| b.try_into().ok())
                    .ok_or_else(|| malformed("signature must be 64 bytes"))?;
                Some(Signature(bytes))
            }
        };

        let msig = match value.get("msig") {
            None => None,
            Some(v) => Some(MultisigSignature::from_value(v)?),
        };

        Ok(Self {
            program,
            args,
            sig,
            msig,
        })
    }
}

/// Sign a transaction with a logic signature, producing the transaction id
/// and the encoded `{lsig, txn}` blob.
///
/// The logic signature is verified against the transaction's sender before
/// any output is produced — emitting a blob the node would reject, or one
/// whose sender does not correspond to the attached program, is never
/// useful.
pub fn sign_logic_sig_transaction(
    txn: &Transaction,
    lsig: &LogicSig,
) -> Result<(String, Vec<u8>), TransactionError> {
    let sender = PublicKey(*txn.sender.as_bytes());
    if !lsig.verify(&sender) {
        return Err(TransactionError::InvalidSignature);
    }
    let blob = encode(&Value::map(vec![
        ("lsig", lsig.to_value()),
        ("txn", txn.to_value()),
    ]));
    Ok((txn.id(), blob))
}
